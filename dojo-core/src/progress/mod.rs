pub(crate) mod quiz;
pub(crate) mod steps;
pub(crate) mod store;
