//! Application state and logic

mod event;
mod handlers;
mod state;
mod worker;

pub use event::{Event, Handler};
pub use handlers::Actions;
pub use state::{
    App, Conversation, Focus, InputState, Message, Mode, ModelPickerState, ModelSlot, Request,
    Role, RunJob, SidebarRow, SlotBoard, UiState,
};
pub use worker::{Spawner, Worker, WorkerEvent};
