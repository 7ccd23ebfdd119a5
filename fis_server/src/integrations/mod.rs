pub mod lygos;
