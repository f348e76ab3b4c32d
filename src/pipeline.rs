pub(crate) mod opts;
pub(crate) mod paths;
pub(crate) mod plan;
pub(crate) mod runner;
