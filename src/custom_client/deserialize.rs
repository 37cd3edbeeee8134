use serde::{Deserialize, Deserializer};

/// speedrun.com sends `""` or `null` for entities without an invite.
pub fn maybe_invite<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s: Option<String> = Deserialize::deserialize(d)?;

    Ok(s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()))
}

/// Missing list fields are treated as empty lists.
pub fn maybe_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let list: Option<Vec<T>> = Deserialize::deserialize(d)?;

    Ok(list.unwrap_or_default())
}
