//! Document assembly - one `---` document per rendered CRD version.

use std::io::Write;

use tracing::debug;

use crate::config::DocConfig;
use crate::error::DocGenError;
use crate::types::{CrdSpec, CrdVersion};
use crate::walker::write_properties;
use crate::writer::Writer;

/// Pick the CRD versions to render.
///
/// `version_override` beats the overlay's `_version`; with neither, the CRD's
/// storage version is used.
///
/// # Errors
///
/// Returns `DocGenError::VersionNotFound` if a requested version is absent,
/// or `DocGenError::NoVersionSelected` if nothing names a version and the CRD
/// has no obvious default.
pub fn select_versions<'a>(
    spec: &'a CrdSpec,
    config: &DocConfig,
    version_override: Option<&str>,
) -> Result<Vec<&'a CrdVersion>, DocGenError> {
    let requested = match version_override {
        Some(v) => vec![v.to_string()],
        None => config.versions()?,
    };

    if requested.is_empty() {
        let version = spec
            .default_version()
            .ok_or(DocGenError::NoVersionSelected)?;
        debug!(version = %version.name, "no version configured, using CRD default");
        return Ok(vec![version]);
    }

    requested
        .iter()
        .map(|name| {
            spec.version(name)
                .ok_or_else(|| DocGenError::VersionNotFound {
                    version: name.clone(),
                    available: spec.version_names(),
                })
        })
        .collect()
}

/// Select the versions to render and check that each one carries a schema.
///
/// # Errors
///
/// Returns the errors of [`select_versions`], or
/// `DocGenError::MissingSchema` for the first version without an
/// `openAPIV3Schema`.
pub fn resolve_versions<'a>(
    spec: &'a CrdSpec,
    config: &DocConfig,
    version_override: Option<&str>,
) -> Result<Vec<&'a CrdVersion>, DocGenError> {
    let versions = select_versions(spec, config, version_override)?;
    if let Some(missing) = versions.iter().find(|v| v.schema.is_none()) {
        return Err(DocGenError::MissingSchema {
            version: missing.name.clone(),
        });
    }
    Ok(versions)
}

/// Write one version's document: separator, `apiVersion`/`kind` header, then
/// the walked root schema.
///
/// # Errors
///
/// Returns `DocGenError::MissingSchema` if the version carries no
/// `openAPIV3Schema`, or `DocGenError::Io` if writing fails.
pub fn write_version<W: Write>(
    out: &mut Writer<W>,
    spec: &CrdSpec,
    version: &CrdVersion,
    config: &DocConfig,
) -> Result<(), DocGenError> {
    let schema = version
        .schema
        .as_ref()
        .ok_or_else(|| DocGenError::MissingSchema {
            version: version.name.clone(),
        })?;

    out.line("---")?;
    out.line(&format!("apiVersion: {}/{}", spec.group, version.name))?;
    out.line(&format!("kind: {}", spec.names.kind))?;
    write_properties(out, &schema.open_api_v3_schema, config)?;
    Ok(())
}

/// Render every selected version of a CRD into `out`.
///
/// `config` should be the root node from [`DocConfig::root`]. Versions are
/// resolved before anything is written, so a missing version or schema
/// leaves `out` untouched.
///
/// # Errors
///
/// Returns the errors of [`resolve_versions`] and [`write_version`].
pub fn write_document<W: Write>(
    out: &mut Writer<W>,
    spec: &CrdSpec,
    config: &DocConfig,
    version_override: Option<&str>,
) -> Result<Vec<String>, DocGenError> {
    let versions = resolve_versions(spec, config, version_override)?;

    for version in &versions {
        write_version(out, spec, version, config)?;
    }
    out.flush()?;

    Ok(versions.into_iter().map(|v| v.name.clone()).collect())
}

/// Render a CRD to a string.
///
/// # Errors
///
/// Same as [`write_document`].
pub fn render(
    spec: &CrdSpec,
    config: &DocConfig,
    version_override: Option<&str>,
    wrap: usize,
) -> Result<String, DocGenError> {
    let mut out = Writer::with_wrap(Vec::new(), wrap);
    write_document(&mut out, spec, config, version_override)?;
    Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
}
