//! Low-level I/O support for scan-file reading

pub mod seekable;
pub mod byte_order;
