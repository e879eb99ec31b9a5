pub mod c;
pub mod fortran;
pub mod json;
