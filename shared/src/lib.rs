mod history;
mod modality;
mod response;

pub use history::HistoryEntry;
pub use modality::{Modality, SlotSpec, present_slots, required_slots};
pub use response::{
    Classified, CombinedResponse, ModalityResult, PredictionResult, ResultBlock, ServiceError,
    classify, result_blocks,
};
