use http::Method;

/// Action used when the path has no usable last segment.
pub const DEFAULT_ACTION: &str = "Index";

/// Suffix appended to the action name of POST requests when the suffix
/// convention is enabled.
pub const POST_SUFFIX: &str = "_post";

/// Resolve the action name for `path` requested with `method`.
///
/// `post_suffix` enables the `_post` convention that lets a controller
/// register separate actions for the GET and POST forms of the same path.
#[must_use]
pub fn resolve_action(path: &str, method: &Method, post_suffix: bool) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);

    let mut action = match last_segment(path) {
        Some(segment) => {
            let name = match segment.find('.') {
                Some(ext) => &segment[..ext],
                None => segment,
            };
            capitalize_first(name)
        }
        None => DEFAULT_ACTION.to_string(),
    };

    if post_suffix && *method == Method::POST {
        action.push_str(POST_SUFFIX);
    }
    action
}

/// Remove the first `_post` occurrence so error messages show the name the
/// user actually requested.
#[must_use]
pub fn strip_post_suffix(action: &str) -> String {
    action.replacen(POST_SUFFIX, "", 1)
}

/// Text after the final `/`, if there is any.
fn last_segment(path: &str) -> Option<&str> {
    path.rsplit_once('/')
        .map(|(_, segment)| segment)
        .filter(|segment| !segment.is_empty())
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
