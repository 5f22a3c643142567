/// Failure raised by a constructor implementation itself, as opposed to the
/// engine failing to assemble its inputs.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
