pub mod feedback_panel;
pub mod option_grid;
pub mod result_screen;
pub mod scenario_card;
pub mod start_screen;
pub mod vitals_hud;

pub use feedback_panel::FeedbackPanel;
pub use option_grid::OptionGrid;
pub use result_screen::ResultScreen;
pub use scenario_card::ScenarioCard;
pub use start_screen::StartScreen;
pub use vitals_hud::VitalsHud;
