pub(crate) mod chaos;
pub(crate) mod color;
pub(crate) mod kinds;
pub(crate) mod seed;
