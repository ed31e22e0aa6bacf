use control_break_shared_kernel::BoxError;

/// Result of one user callback invocation.
pub type Outcome = std::result::Result<(), BoxError>;

/// Return types accepted from user callbacks.
///
/// Plain `()` callbacks never fail; callbacks returning `Result<(), E>` abort
/// processing with `E` as the source of the reported error.
pub trait CallbackOutcome {
    fn into_outcome(self) -> Outcome;
}

impl CallbackOutcome for () {
    #[inline]
    fn into_outcome(self) -> Outcome {
        Ok(())
    }
}

impl<E> CallbackOutcome for std::result::Result<(), E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn into_outcome(self) -> Outcome {
        self.map_err(Into::into)
    }
}

/// Why a key selector produced no usable key.
pub enum KeyFault {
    Missing,
    Failed(BoxError),
}

impl KeyFault {
    pub(crate) fn into_source(self) -> Option<BoxError> {
        match self {
            Self::Missing => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Failure raised while a level session handles a record.
pub enum Fault {
    Key { level: usize, fault: KeyFault },
    Callback(BoxError),
}
