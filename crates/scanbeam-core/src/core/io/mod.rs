pub mod egsinp;
