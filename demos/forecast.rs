use anyhow::Result;
use openmeteo::{Client, ForecastParams};

fn main() -> Result<()> {
    env_logger::init();

    // Example program that calls the library API against the public
    // hosted service. No authentication is required.
    let client = Client::new(None, None)?;

    let forecast = client.forecast(&ForecastParams {
        latitude: 52.52,
        longitude: 13.41,
        hourly: Some(vec!["temperature_2m".into(), "rain".into()]),
        daily: Some(vec!["temperature_2m_max".into()]),
        forecast_days: Some(3),
        timezone: Some("auto".into()),
        ..ForecastParams::default()
    })?;

    println!(
        "Forecast for {:.2}, {:.2} ({}):",
        forecast.latitude, forecast.longitude, forecast.timezone
    );

    if let (Some(hourly), Some(units)) = (&forecast.hourly, &forecast.hourly_units) {
        let unit = units.get("temperature_2m").map(String::as_str).unwrap_or("");
        if let (Some(times), Some(temps)) = (hourly.get("time"), hourly.get("temperature_2m")) {
            for (time, temp) in times.iter().zip(temps).take(6) {
                let time = time.as_ref().and_then(|s| s.as_str()).unwrap_or("?");
                match temp.as_ref().and_then(|s| s.as_f64()) {
                    Some(value) => println!("  {time}  {value}{unit}"),
                    None => println!("  {time}  (no data)"),
                }
            }
        }
    }

    client.close();
    Ok(())
}
