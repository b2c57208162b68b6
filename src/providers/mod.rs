pub mod fxconvert;
