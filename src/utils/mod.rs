pub mod latin1;
