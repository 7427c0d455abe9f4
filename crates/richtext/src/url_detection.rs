// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use url::{Host, Url};

const IMAGE_EXTENSIONS: &[&str] = &[
    "apng", "avif", "bmp", "gif", "ico", "jpeg", "jpg", "png", "svg", "tif",
    "tiff", "webp",
];

fn parse_absolute(text: &str) -> Option<Url> {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return None;
    }
    let url = Url::parse(text).ok()?;
    let has_host = match url.host()? {
        Host::Domain(domain) => domain.contains('.') || domain == "localhost",
        Host::Ipv4(_) | Host::Ipv6(_) => true,
    };
    has_host.then_some(url)
}

/// True for an absolute URL with a host, like `https://example.com/a`.
pub fn is_url(text: &str) -> bool {
    parse_absolute(text).is_some()
}

/// True for a URL whose path ends in a known image extension.
pub fn is_image_url(text: &str) -> bool {
    let Some(url) = parse_absolute(text) else {
        return false;
    };
    url.path()
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .is_some_and(|extension| IMAGE_EXTENSIONS.contains(&extension.as_str()))
}

/// True for a `data:` URL holding an image.
pub fn is_image_data_url(text: &str) -> bool {
    text.get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:image/"))
}
