//! Mapping command failures to return codes.

use std::any::type_name;
use std::error::Error as StdError;
use std::fmt;

use tracing::debug;

type Handler = Box<dyn Fn(&(dyn StdError + 'static)) -> Option<i32>>;

struct Registered {
    error_type: &'static str,
    handler: Handler,
}

/// Ordered error handlers keyed by error type.
///
/// [`classify`](Self::classify) walks the error's cause chain from the
/// outermost error inwards; for each link the handlers are tried in
/// registration order and the first one whose type matches decides the
/// code.
///
/// # Examples
///
/// ```
/// use anyhow::Context;
/// use command_dispatch_engine::ErrorHandlers;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("not found")]
/// struct NotFound;
///
/// let handlers = ErrorHandlers::new().on(|_: &NotFound| 4);
///
/// let err = Err::<(), _>(NotFound).context("loading profile").unwrap_err();
/// assert_eq!(handlers.classify(&err), Some(4));
/// assert_eq!(handlers.classify(&anyhow::anyhow!("other")), None);
/// ```
#[derive(Default)]
pub struct ErrorHandlers {
    handlers: Vec<Registered>,
}

impl ErrorHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler for errors of type `E`.
    pub fn register<E>(&mut self, handler: impl Fn(&E) -> i32 + 'static) -> &mut Self
    where
        E: StdError + 'static,
    {
        self.handlers.push(Registered {
            error_type: type_name::<E>(),
            handler: Box::new(move |error: &(dyn StdError + 'static)| {
                error.downcast_ref::<E>().map(&handler)
            }),
        });
        self
    }

    pub fn on<E>(mut self, handler: impl Fn(&E) -> i32 + 'static) -> Self
    where
        E: StdError + 'static,
    {
        self.register(handler);
        self
    }

    /// Return code for `error`, or `None` when no handler matches.
    pub fn classify(&self, error: &anyhow::Error) -> Option<i32> {
        for (depth, cause) in error.chain().enumerate() {
            for registered in &self.handlers {
                if let Some(code) = (registered.handler)(cause) {
                    debug!(
                        error_type = registered.error_type,
                        depth,
                        code,
                        "Error handler matched"
                    );
                    return Some(code);
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ErrorHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|registered| registered.error_type))
            .finish()
    }
}
