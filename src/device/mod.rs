pub mod ps2;
