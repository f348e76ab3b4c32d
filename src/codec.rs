pub(crate) mod header;
pub(crate) mod io;
pub(crate) mod raster;
pub(crate) mod store;
