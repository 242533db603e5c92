pub(crate) mod absolute;
pub(crate) mod compiler;
pub(crate) mod driver;
pub(crate) mod graph;
pub(crate) mod resolve;
