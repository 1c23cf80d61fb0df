use url::Url;

/// Sharing link of the ARTE clip used in module three.
pub const VIDEO_URL: &str = "https://www.dropbox.com/scl/fi/d3dlrwqcqilxfh2rp5kva/Uncanny-Valley-Verst-rende-hnlichkeit-Kultur-erkl-rt-Flick-Flack-ARTE.mp4?rlkey=tt803xeh6vsg5s9sguc2sw1se&st=zkiy7due&dl=0";

/// Course PDFs listed in the text export, as `(label, relative path)`.
pub const DOCUMENTS: [(&str, &str); 2] = [
    ("PDF Uncanny Valley", "assets/docs/uncanny_valley.pdf"),
    (
        "PDF KI als Spiegel (Wampfler)",
        "assets/docs/wampfler_ki_als_spiegel.pdf",
    ),
];

/// Rewrites a Dropbox sharing link so it streams directly (`dl=1`).
///
/// Every other query pair keeps its position. Strings that do not parse as an
/// absolute URL get their first literal `dl=0` replaced instead.
#[must_use]
pub fn to_direct_link(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            force_query_param(&mut url, "dl", "1");
            url.to_string()
        }
        Err(_) => raw.replacen("dl=0", "dl=1", 1),
    }
}

/// Direct variant of [`VIDEO_URL`].
#[must_use]
pub fn video_direct_link() -> String {
    to_direct_link(VIDEO_URL)
}

fn force_query_param(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut seen = false;
    pairs.retain_mut(|(name, current)| {
        if name != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *current = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(name, current)| (name.as_str(), current.as_str())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_dl_and_keeps_other_params_in_order() {
        let direct = to_direct_link("https://www.dropbox.com/scl/fi/abc/v.mp4?rlkey=tt8&dl=0&st=zk");
        assert_eq!(
            direct,
            "https://www.dropbox.com/scl/fi/abc/v.mp4?rlkey=tt8&dl=1&st=zk"
        );
    }

    #[test]
    fn appends_dl_when_missing_and_drops_duplicates() {
        assert_eq!(
            to_direct_link("https://host.example/v?x=1"),
            "https://host.example/v?x=1&dl=1"
        );
        assert_eq!(
            to_direct_link("https://host.example/v?dl=0&a=b&dl=0"),
            "https://host.example/v?dl=1&a=b"
        );
    }

    #[test]
    fn malformed_url_replaces_first_literal_only() {
        assert_eq!(
            to_direct_link("host/path?dl=0&note=dl=0"),
            "host/path?dl=1&note=dl=0"
        );
        assert_eq!(to_direct_link("no params here"), "no params here");
    }

    #[test]
    fn video_link_becomes_direct() {
        let direct = video_direct_link();
        assert!(direct.ends_with("&st=zkiy7due&dl=1"), "{direct}");
        assert!(direct.contains("rlkey=tt803xeh6vsg5s9sguc2sw1se"));
        assert_eq!(direct.replace("dl=1", "dl=0"), VIDEO_URL);
    }
}
