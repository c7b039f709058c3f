pub(crate) mod label;
pub(crate) mod placement;
pub(crate) mod table;
