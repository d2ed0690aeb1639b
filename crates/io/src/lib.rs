// File I/O operations: workbook import, artifact export

pub mod csv;
pub mod xlsx;
