pub mod evac;
