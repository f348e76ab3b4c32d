pub(crate) mod blend;
pub(crate) mod channel;
pub(crate) mod geometry;
