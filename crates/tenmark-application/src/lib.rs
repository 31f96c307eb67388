pub mod ticker;
pub mod wizard;

pub use ticker::TimerTicker;
pub use wizard::{CampaignFields, MockupView, TimerView, Wizard};
