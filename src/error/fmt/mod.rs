pub(crate) mod timestamp;
