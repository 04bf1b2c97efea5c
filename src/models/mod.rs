pub mod calendar;
pub mod market;
pub mod recipient;
pub mod telegram;

pub use calendar::{CalendarEvent, Impact};
pub use market::{HistoricalPoint, HistoricalResponse};
pub use recipient::Recipient;
pub use telegram::{Chat, IncomingMessage, Update};

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
