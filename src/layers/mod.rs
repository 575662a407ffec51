pub mod recurrent;

pub use recurrent::{RecurrentLayerSerialization, RnnCellSerialization};
