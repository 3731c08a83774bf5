pub(crate) mod anchor;
pub(crate) mod scaler;
pub(crate) mod tree;
