//! Weather Card Component
//!
//! Current conditions for the searched city with the favorite toggle.

use leptos::prelude::*;
use weather_core::domain::WeatherReport;

use super::SearchHandle;

/// Icons come back protocol-relative
fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{}", icon)
    } else {
        icon.to_string()
    }
}

/// One labelled reading, with an optional qualifier
#[component]
pub fn DetailItem(
    title: &'static str,
    value: String,
    #[prop(optional)] warning: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="detail-item">
            <span class="detail-title">{title}</span>
            <span class="detail-value">{value}</span>
            {warning.map(|w| view! { <span class="detail-warning">{w}</span> })}
        </div>
    }
}

fn report_view(report: WeatherReport, is_favorite: bool, search: SearchHandle) -> impl IntoView {
    let uv_level = report.uv_level();
    view! {
        <div class="weather-card">
            <div class="weather-card-header">
                <h1 class="weather-city">{report.city.clone()}</h1>
                <button
                    class="favorite-btn"
                    title=if is_favorite { "Remove from favorites" } else { "Add to favorites" }
                    on:click=move |_| search.toggle_favorite()
                >
                    {if is_favorite { "❤️" } else { "🤍" }}
                </button>
            </div>

            <div class="weather-now">
                <img src=icon_url(&report.condition_icon) alt=report.condition.clone() class="weather-icon" />
                <div>
                    <p class="weather-temp">{format!("{}°C", report.temperature.celsius)}</p>
                    <p class="weather-condition">{report.condition.clone()}</p>
                </div>
            </div>

            <div class="weather-details">
                <DetailItem title="Feels like" value=format!("{}°C", report.feelslike_c) />
                <DetailItem title="Humidity" value=format!("{}%", report.humidity) />
                <DetailItem title="Wind" value=format!("{} km/h", report.wind_speed) />
                <DetailItem title="Gusts" value=format!("{} km/h", report.gust_kph) />
                <DetailItem title="Pressure" value=format!("{} mb", report.pressure_mb) />
                <DetailItem title="Visibility" value=format!("{} km", report.vis_km) />
                <DetailItem title="Dew point" value=format!("{}°C", report.dewpoint_c) />
                <DetailItem title="UV" value=report.uv.to_string() warning=uv_level />
                <DetailItem title="Clouds" value=format!("{}%", report.cloud) />
            </div>
        </div>
    }
}

#[component]
pub fn WeatherCard(search: SearchHandle) -> impl IntoView {
    view! {
        {move || search.notice.get().map(|notice| view! {
            <p class="favorite-notice">{notice}</p>
        })}
        {move || {
            let (weather, is_favorite) = search.state.with(|s| (s.weather.clone(), s.is_favorite));
            weather.map(|report| report_view(report, is_favorite, search))
        }}
    }
}
