//! Image coordinate parsing.
//!
//! Decomposes an image string such as `harbor.example.com/team/app:v1` into
//! the pieces the registry API addresses separately: the registry domain, the
//! project, the repository name inside that project (which may itself contain
//! slashes) and the tag or digest.
//!
//! Parsing is delegated to [`oci_spec::distribution::Reference`], which checks
//! the distribution reference grammar and normalizes Docker names: a missing
//! domain means `docker.io`, `index.docker.io` is an alias for it, and
//! single-component Docker Hub names live under `library/`. A coordinate that
//! is only a registry host is recognized before the grammar sees it.
//!
//! | coordinate | domain | project | repository | reference |
//! |---|---|---|---|---|
//! | `harbor.example.com/library/nginx:alpine` | `harbor.example.com` | `library` | `nginx` | `alpine` |
//! | `harbor.example.com/nginx` | `harbor.example.com` | `library` | `nginx` | `latest` |
//! | `harbor.example.com/team/group/app:v1` | `harbor.example.com` | `team` | `group/app` | `v1` |
//! | `team/app@sha256:…` | `docker.io` | `team` | `app` | `sha256:…` |

use crate::error::{HarborError, Result};
use oci_spec::distribution::Reference as OciReference;
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Domain used when a coordinate does not name one.
pub const DEFAULT_DOMAIN: &str = "docker.io";

/// Project used when the path has a single component.
pub const DEFAULT_PROJECT: &str = "library";

/// Tag used when neither a tag nor a digest is given.
pub const DEFAULT_TAG: &str = "latest";

/// A parsed image coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    domain: String,
    project: String,
    repository: String,
    reference: String,
}

impl ImageReference {
    /// Parses an image coordinate.
    ///
    /// A coordinate that is only a registry host (`harbor.example.com`,
    /// `localhost:5000`) parses with an empty repository. Use
    /// [`ImageReference::parse_coordinate`] to reject those.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::reference::ImageReference;
    ///
    /// let image = ImageReference::parse("harbor.example.com/team/group/app:v1").unwrap();
    /// assert_eq!(image.domain(), "harbor.example.com");
    /// assert_eq!(image.project(), "team");
    /// assert_eq!(image.repository(), "group/app");
    /// assert_eq!(image.reference(), "v1");
    /// ```
    pub fn parse(image: &str) -> Result<Self> {
        if let Some((host, tag)) = bare_host(image)? {
            return Ok(Self {
                domain: host.to_string(),
                project: DEFAULT_PROJECT.to_string(),
                repository: String::new(),
                reference: tag.unwrap_or(DEFAULT_TAG).to_string(),
            });
        }

        let parsed = parse_oci(image)?;

        // Only the first slash separates the project; the rest belongs to the repository.
        let (project, repository) = match parsed.repository().split_once('/') {
            Some((project, repository)) => (project.to_string(), repository.to_string()),
            None => (DEFAULT_PROJECT.to_string(), parsed.repository().to_string()),
        };

        let reference = parsed
            .digest()
            .or(parsed.tag())
            .unwrap_or(DEFAULT_TAG)
            .to_string();

        Ok(Self {
            domain: parsed.registry().to_string(),
            project,
            repository,
            reference,
        })
    }

    /// Parses a coordinate that must address an artifact inside a project.
    ///
    /// Fails with [`HarborError::NotRegistryCoordinate`] when the project,
    /// repository or reference comes out empty, which [`ImageReference::parse`]
    /// alone accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::error::HarborError;
    /// use libharbor::reference::ImageReference;
    ///
    /// let image = ImageReference::parse_coordinate("harbor.example.com/library/nginx:alpine").unwrap();
    /// assert_eq!(image.name(), "library/nginx");
    ///
    /// let err = ImageReference::parse_coordinate("harbor.example.com").unwrap_err();
    /// assert!(matches!(err, HarborError::NotRegistryCoordinate { .. }));
    /// ```
    pub fn parse_coordinate(image: &str) -> Result<Self> {
        let parsed = Self::parse(image)?;
        if parsed.project.is_empty() || parsed.repository.is_empty() || parsed.reference.is_empty()
        {
            return Err(HarborError::not_registry_coordinate(image));
        }
        Ok(parsed)
    }

    /// Returns the registry domain, including a port if one was given.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the project (first path component).
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the repository name inside the project.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the tag, or the full `algorithm:hex` digest for digest-addressed images.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns true if the reference is a digest rather than a tag.
    pub fn is_digest(&self) -> bool {
        // Tags cannot contain ':'.
        self.reference.contains(':')
    }

    /// Returns `project/repository`, the repository path inside the registry.
    pub fn name(&self) -> String {
        format!("{}/{}", self.project, self.repository)
    }
}

impl FromStr for ImageReference {
    type Err = HarborError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repository.is_empty() {
            return f.write_str(&self.domain);
        }
        let separator = if self.is_digest() { '@' } else { ':' };
        write!(
            f,
            "{}/{}/{}{}{}",
            self.domain, self.project, self.repository, separator, self.reference
        )
    }
}

/// Splits an image into a name and a tag for display purposes.
///
/// The name is returned as written (no defaults) and the tag is the tag or
/// digest as written, or empty. Strings the reference grammar rejects are cut
/// at their last colon instead. The result carries no project/repository
/// split and must not be used to address the API.
///
/// # Examples
///
/// ```
/// use libharbor::reference::split_name_tag;
///
/// assert_eq!(
///     split_name_tag("harbor.example.com/library/nginx:alpine"),
///     ("harbor.example.com/library/nginx".to_string(), "alpine".to_string())
/// );
/// assert_eq!(split_name_tag("nginx"), ("nginx".to_string(), String::new()));
/// ```
pub fn split_name_tag(image: &str) -> (String, String) {
    if let Ok(Some((host, tag))) = bare_host(image) {
        return (host.to_string(), tag.unwrap_or_default().to_string());
    }

    match parse_oci(image) {
        Ok(parsed) => {
            let rest = image.split_once('@').map_or(image, |(rest, _)| rest);
            // The parser fills in `latest`; only report a tag that was written.
            let (name, tag) = match parsed.tag() {
                Some(tag) => match rest.strip_suffix(tag).and_then(|n| n.strip_suffix(':')) {
                    Some(name) => (name, tag),
                    None => (rest, ""),
                },
                None => (rest, ""),
            };
            let tag = parsed.digest().unwrap_or(tag);
            (name.to_string(), tag.to_string())
        }
        Err(_) => match image.rsplit_once(':') {
            Some((name, tag)) => (name.to_string(), tag.to_string()),
            None => (image.to_string(), String::new()),
        },
    }
}

/// Parses with the distribution reference grammar.
///
/// Uppercase is only allowed in a registry domain, and a bare 64-character
/// hex string is an image ID rather than a name.
fn parse_oci(image: &str) -> Result<OciReference> {
    if is_identifier(image) {
        return Err(HarborError::reference(format!(
            "invalid repository name ({}), cannot specify 64-byte hexadecimal strings",
            image
        )));
    }

    let parsed = OciReference::from_str(image).map_err(|e| {
        HarborError::reference_with_source(format!("Invalid image reference '{}'", image), e)
    })?;

    if parsed.repository().chars().any(|c| c.is_ascii_uppercase()) {
        return Err(HarborError::reference(format!(
            "repository name must be lowercase: '{}'",
            image
        )));
    }
    Ok(parsed)
}

/// Recognizes a coordinate that is only a registry host, such as
/// `harbor.example.com`, `localhost:5000` or `my.app:v1`.
///
/// The distribution grammar would read these as Docker Hub repositories.
/// Returns the host and the tag, if one follows it.
fn bare_host(image: &str) -> Result<Option<(&str, Option<&str>)>> {
    if image.contains('/') || image.contains('@') {
        return Ok(None);
    }

    let (hostname, host, tag) = match image.split_once(':') {
        Some((hostname, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (hostname, image, None)
        }
        Some((hostname, tag)) => (hostname, hostname, Some(tag)),
        None => (image, image, None),
    };
    if !hostname.contains('.') && hostname != "localhost" {
        return Ok(None);
    }

    // Let the grammar check the host (and tag) by placing them in front of a repository.
    let candidate = match tag {
        Some(tag) => format!("{}/{}:{}", host, DEFAULT_PROJECT, tag),
        None => format!("{}/{}", host, DEFAULT_PROJECT),
    };
    OciReference::from_str(&candidate).map_err(|e| {
        HarborError::reference_with_source(format!("Invalid registry host '{}'", image), e)
    })?;
    Ok(Some((host, tag)))
}

/// A 64-character lowercase hex string, reserved for image IDs.
fn is_identifier(image: &str) -> bool {
    image.len() == 64 && image.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
