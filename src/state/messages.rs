use crate::state::loader::LoadingState;
use aotui_core::Dataset;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum LoadRequest {
    LoadDataset,
}

#[derive(Debug)]
pub enum LoadResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DatasetLoaded { dataset: Box<Dataset> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
