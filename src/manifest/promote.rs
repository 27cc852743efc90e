//! Rewrites an internal manifest into a public one.

use super::template::REGIONS_PLACEHOLDER;
use crate::error::{PublisherError, Result};

const INTERNAL_TRUE: &str = "<IsInternalExtension>true</IsInternalExtension>";
const INTERNAL_FALSE: &str = "<IsInternalExtension>false</IsInternalExtension>";
const REGIONS_OPEN: &str = "<Regions>";
const REGIONS_CLOSE: &str = "</Regions>";
const IMAGE_CLOSE: &str = "</ExtensionImage>";

/// Makes the extension public in the given regions only.
pub fn promote_to_regions(manifest: &str, regions: &[String]) -> Result<String> {
    let regions: Vec<&str> = regions
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect();
    if regions.is_empty() {
        return Err(PublisherError::Manifest {
            reason: "at least one region is required for promotion".to_string(),
        });
    }

    let public = make_public(manifest)?;
    let element = format!(
        "{}{}{}",
        REGIONS_OPEN,
        super::xml_escape(&regions.join(";")),
        REGIONS_CLOSE
    );
    set_regions(&public, Some(&element))
}

/// Makes the extension public everywhere.
pub fn promote_to_all_regions(manifest: &str) -> Result<String> {
    let public = make_public(manifest)?;
    set_regions(&public, None)
}

fn make_public(manifest: &str) -> Result<String> {
    if manifest.contains(INTERNAL_TRUE) {
        Ok(manifest.replacen(INTERNAL_TRUE, INTERNAL_FALSE, 1))
    } else if manifest.contains(INTERNAL_FALSE) {
        Ok(manifest.to_string())
    } else {
        Err(PublisherError::Manifest {
            reason: "manifest has no <IsInternalExtension> element".to_string(),
        })
    }
}

/// Replaces any regional restriction with `element`, or drops it when `None`.
///
/// The result holds at most one `<Regions>` element. It goes where the
/// placeholder was, else where the first existing element was, else just
/// before `</ExtensionImage>`.
fn set_regions(manifest: &str, element: Option<&str>) -> Result<String> {
    let (mut stripped, first_regions) = strip_regions(manifest)?;

    if stripped.contains(REGIONS_PLACEHOLDER) {
        return Ok(stripped.replacen(REGIONS_PLACEHOLDER, element.unwrap_or(""), 1));
    }

    let Some(element) = element else {
        return Ok(stripped);
    };

    if let Some(at) = first_regions {
        stripped.insert_str(at, element);
        return Ok(stripped);
    }

    let close = stripped.rfind(IMAGE_CLOSE).ok_or_else(|| PublisherError::Manifest {
        reason: "manifest has no closing </ExtensionImage> tag".to_string(),
    })?;
    stripped.insert_str(close, &format!("  {}\n", element));
    Ok(stripped)
}

/// Removes every `<Regions>` element, returning the offset of the first one.
fn strip_regions(manifest: &str) -> Result<(String, Option<usize>)> {
    let mut out = manifest.to_string();
    let mut first = None;
    while let Some(start) = out.find(REGIONS_OPEN) {
        let end = out[start..]
            .find(REGIONS_CLOSE)
            .map(|i| start + i + REGIONS_CLOSE.len())
            .ok_or_else(|| PublisherError::Manifest {
                reason: "unterminated <Regions> element".to_string(),
            })?;
        out.replace_range(start..end, "");
        first.get_or_insert(start);
    }
    Ok((out, first))
}
