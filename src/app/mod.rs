//! Interaktions-Schicht: Eingabe-Events, EditMode-Zustandsmaschine und
//! der GraphManager als Registry-, Factory- und Persistenz-Fassade.

pub mod edit_mode;
pub mod events;
pub mod manager;

pub use edit_mode::{EditMode, EditState, GraphFinishHandler, GraphSelectHandler};
pub use events::{InputEvent, Key};
pub use manager::GraphManager;
