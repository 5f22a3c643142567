use crate::any::TypeKey;

#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("constructor for `{output}` lists its own output type as an input")]
    SelfCycle { output: TypeKey },
    #[error("no entry registered for `{target}`")]
    NoEntry { target: TypeKey },
}
