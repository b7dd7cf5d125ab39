//! Globe Markup Editor Library.
//! Interaktives Erstellen, Bearbeiten und Persistieren von
//! Vektor-Annotationen (Punkte, Linien, Polygone, Messungen) auf einem
//! 3D-Globus. Rendering, Kamera und Uhr liefert eine externe
//! Szenen-Engine über den `SceneEngine`-Vertrag.

pub mod app;
pub mod core;
pub mod scene;
pub mod shapes;
pub mod shared;

pub use app::{EditMode, EditState, GraphManager, InputEvent, Key};
pub use core::{
    ControlPoint, ControlPointRecord, GeoPosition, Graph, GraphCollection, GraphRecord, GraphState,
    GraphStyle, PickIndex, PickMatch, PositionProperty, PositionSample, SimTime,
};
pub use scene::{
    EntityGeometry, EntityId, InputKind, ListenerHandle, MemoryScene, SceneEngine, SceneEntity,
};
pub use shapes::{
    registered_tags, shape_spec, GraphKind, Measurement, ShapeComputer, ShapeGeometry,
    SHAPE_REGISTRY,
};
pub use shared::MarkupOptions;
