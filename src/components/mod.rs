//! UI Components
//!
//! Pages and the pieces they are built from.

mod search_handle;
mod search_bar;
mod weather_card;
mod history_list;
mod favorites_list;
mod weather_table;
mod login_page;
mod home_page;

pub use search_handle::SearchHandle;
pub use search_bar::SearchBar;
pub use weather_card::{DetailItem, WeatherCard};
pub use history_list::HistoryList;
pub use favorites_list::FavoritesList;
pub use weather_table::WeatherTable;
pub use login_page::LoginPage;
pub use home_page::HomePage;
