use anyhow::Result;

use crate::{
    diagnostics::Diagnostics, registry::ApplicationRegistry, request::ApplicationRequest, status,
};

/// Terminal state of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No application name was given.
    NoApp,
    /// The name did not match any registered application.
    Unknown { name: String },
    /// An application ran and returned `status`.
    Dispatched { name: String, status: i32 },
}

impl Dispatch {
    /// Exit status for this outcome. Application statuses pass through as-is.
    pub const fn status(&self) -> i32 {
        match self {
            Self::NoApp => status::NO_APP_SPECIFIED,
            Self::Unknown { .. } => status::UNKNOWN_APP_SPECIFIED,
            Self::Dispatched { status, .. } => *status,
        }
    }
}

/// Central dispatcher: routes a request to its registered application.
///
/// At most one application runs. The only diagnostic at warning level is the
/// one naming an unknown application.
///
/// # Errors
/// Returns whatever error the invoked application returned, unchanged.
pub fn dispatch(
    registry: &ApplicationRegistry,
    request: ApplicationRequest,
    diagnostics: &dyn Diagnostics,
) -> Result<Dispatch> {
    let (name, options) = request.into_parts();
    let Some(name) = name else {
        diagnostics.info("no application specified");
        return Ok(Dispatch::NoApp);
    };

    let Some(app) = registry.get(&name) else {
        diagnostics.warn(&format!("unknown application specified: {name}"));
        return Ok(Dispatch::Unknown { name });
    };

    tracing::debug!(app = %name, options = ?options, "dispatching");
    let status = app.run(&options)?;
    tracing::debug!(app = %name, status, "application finished");
    Ok(Dispatch::Dispatched { name, status })
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::anyhow;

    use super::*;
    use crate::diagnostics::{Level, RecordingDiagnostics};

    type Calls = Rc<RefCell<Vec<(String, Vec<String>)>>>;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn recording_registry(statuses: &[(&str, i32)]) -> (ApplicationRegistry, Calls) {
        let calls: Calls = Rc::default();
        let mut reg = ApplicationRegistry::new();
        for (name, status) in statuses {
            let calls = Rc::clone(&calls);
            let name_owned = (*name).to_string();
            let status = *status;
            reg.register(*name, move |opts: &[String]| -> Result<i32> {
                calls.borrow_mut().push((name_owned.clone(), opts.to_vec()));
                Ok(status)
            })
            .unwrap();
        }
        (reg, calls)
    }

    fn standard() -> (ApplicationRegistry, Calls) {
        recording_registry(&[("mirror", 0), ("restore", 0), ("report", 0)])
    }

    #[test]
    fn empty_request_returns_no_app_without_running_anything() {
        let (reg, calls) = standard();
        let diag = RecordingDiagnostics::new();

        let out = dispatch(&reg, ApplicationRequest::from_tokens(&[]), &diag).unwrap();

        assert_eq!(out, Dispatch::NoApp);
        assert_eq!(out.status(), status::NO_APP_SPECIFIED);
        assert!(calls.borrow().is_empty());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn report_receives_its_options_in_order() {
        let (reg, calls) = recording_registry(&[("mirror", 0), ("restore", 0), ("report", 17)]);
        let diag = RecordingDiagnostics::new();
        let req = ApplicationRequest::from_tokens(&tokens(&["report", "--verbose", "dir1"]));

        let out = dispatch(&reg, req, &diag).unwrap();

        assert_eq!(out.status(), 17);
        assert_eq!(
            *calls.borrow(),
            vec![("report".to_string(), tokens(&["--verbose", "dir1"]))]
        );
        assert!(diag.entries().is_empty());
    }

    #[test]
    fn unknown_name_warns_once_and_runs_nothing() {
        let (reg, calls) = standard();
        let diag = RecordingDiagnostics::new();

        let out = dispatch(&reg, ApplicationRequest::from_tokens(&tokens(&["frobnicate"])), &diag)
            .unwrap();

        assert_eq!(
            out,
            Dispatch::Unknown {
                name: "frobnicate".into()
            }
        );
        assert_eq!(out.status(), status::UNKNOWN_APP_SPECIFIED);
        assert!(calls.borrow().is_empty());
        let warnings = diag.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("frobnicate"));
    }

    #[test]
    fn unknown_name_is_idempotent() {
        let (reg, calls) = standard();
        for _ in 0..2 {
            let diag = RecordingDiagnostics::new();
            let req = ApplicationRequest::from_tokens(&tokens(&["Mirror", "x"]));
            let out = dispatch(&reg, req, &diag).unwrap();
            assert_eq!(out.status(), status::UNKNOWN_APP_SPECIFIED);
            assert_eq!(diag.warnings().len(), 1);
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn application_status_passes_through_unchanged() {
        for expected in [0, 1, 42, 255, -1, -128, i32::MIN, i32::MAX] {
            let (reg, calls) = recording_registry(&[("restore", expected)]);
            let diag = RecordingDiagnostics::new();
            let req = ApplicationRequest::from_tokens(&tokens(&["restore"]));

            let out = dispatch(&reg, req, &diag).unwrap();

            assert_eq!(out.status(), expected);
            assert_eq!(calls.borrow().len(), 1);
            assert!(calls.borrow()[0].1.is_empty());
        }
    }

    #[test]
    fn only_the_matching_application_runs() {
        let (reg, calls) = standard();
        let diag = RecordingDiagnostics::new();
        let req = ApplicationRequest::from_tokens(&tokens(&["restore", "target"]));

        dispatch(&reg, req, &diag).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "restore");
    }

    #[test]
    fn application_errors_propagate_untouched() {
        let mut reg = ApplicationRegistry::new();
        reg.register("mirror", |_: &[String]| -> Result<i32> {
            Err(anyhow!("disk on fire"))
        })
        .unwrap();
        let diag = RecordingDiagnostics::new();

        let err = dispatch(&reg, ApplicationRequest::from_tokens(&tokens(&["mirror"])), &diag)
            .unwrap_err();

        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(err.chain().count(), 1);
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn no_app_emits_only_an_informational_note() {
        let (reg, _) = standard();
        let diag = RecordingDiagnostics::new();
        dispatch(&reg, ApplicationRequest::default(), &diag).unwrap();
        assert_eq!(diag.entries().len(), 1);
        assert_eq!(diag.entries()[0].0, Level::Info);
    }
}
