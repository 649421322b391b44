//! WebExtension match patterns (`https://www.youtube.com/*`, `*://*.example.com/*`, `<all_urls>`).

/// Check if a URL matches a match pattern.
pub fn url_matches_pattern(url: &str, pattern: &str) -> bool {
    if pattern == "<all_urls>" {
        return url.starts_with("http://") || url.starts_with("https://");
    }

    let Some((scheme_pat, rest)) = pattern.split_once("://") else {
        return false;
    };
    let Some((url_scheme, url_after_scheme)) = url.split_once("://") else {
        return false;
    };

    if url_scheme != "http" && url_scheme != "https" {
        return false;
    }
    if scheme_pat != "*" && scheme_pat != url_scheme {
        return false;
    }

    let (host_pat, path_pat) = match rest.split_once('/') {
        Some((h, p)) => (h, format!("/{}", p)),
        None => (rest, "/".to_string()),
    };

    let (url_host, url_path) = match url_after_scheme.find('/') {
        Some(i) => (&url_after_scheme[..i], &url_after_scheme[i..]),
        None => (url_after_scheme, "/"),
    };

    if host_pat != "*" {
        if let Some(domain) = host_pat.strip_prefix("*.") {
            if url_host != domain && !url_host.ends_with(&format!(".{}", domain)) {
                return false;
            }
        } else if host_pat != url_host {
            return false;
        }
    }

    glob_match(&path_pat, url_path)
}

fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "/*" || pattern == "*" {
        return true;
    }
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let (first, rest) = (parts[0], &parts[1..]);
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };

    // The segment after the last `*` is anchored to the end of the text.
    let (middle, last) = rest.split_at(rest.len() - 1);
    for part in middle.iter().filter(|p| !p.is_empty()) {
        match remaining.find(part) {
            Some(idx) => remaining = &remaining[idx + part.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last[0])
}
