use crate::Error;
use url::Url;
use url::form_urlencoded::Serializer;

pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw).map_err(|err| Error::InvalidConfig {
        message: "invalid base_url".into(),
        source: Some(Box::new(err)),
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::InvalidConfig {
            message: "base_url must not include query or fragment".into(),
            source: None,
        });
    }

    let path = url.path();
    if path != "/" && !path.ends_with('/') {
        url.set_path(&format!("{path}/"));
    }
    Ok(url)
}

pub(crate) fn endpoint_url<'a, I>(base_url: &Url, segments: I) -> Result<Url, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base_url.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| Error::InvalidConfig {
            message: "base_url must be a hierarchical URL".into(),
            source: None,
        })?;
        path.pop_if_empty();
        for seg in segments {
            path.push(seg);
        }
    }
    Ok(url)
}

/// The fully-constructed URL as it goes on the wire: path plus, when query
/// pairs exist, exactly one `?` and the encoded pairs.
pub(crate) fn url_with_query(url: &Url, query: &[(String, String)]) -> Url {
    if query.is_empty() {
        return url.clone();
    }
    let mut full = url.clone();
    full.query_pairs_mut()
        .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    full
}

/// URL-form-encode body pairs, for diagnostics on failed writes.
pub(crate) fn encode_form(pairs: &[(String, String)]) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::form_urlencoded;

    #[test]
    fn normalize_base_url_appends_trailing_slash() {
        let url = normalize_base_url("https://api.chatwork.com/v2").unwrap();
        assert_eq!(url.as_str(), "https://api.chatwork.com/v2/");
    }

    #[test]
    fn normalize_base_url_rejects_query_and_fragment() {
        assert!(normalize_base_url("https://api.chatwork.com/v2?a=1").is_err());
        assert!(normalize_base_url("https://api.chatwork.com/v2#frag").is_err());
    }

    #[test]
    fn endpoint_url_encodes_path_segments() {
        let base = normalize_base_url("https://api.chatwork.com/v2").unwrap();
        let url = endpoint_url(&base, ["rooms", "12 3", "messages"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.chatwork.com/v2/rooms/12%203/messages"
        );
    }

    #[test]
    fn url_with_query_adds_exactly_one_question_mark() {
        let base = normalize_base_url("https://api.chatwork.com/v2").unwrap();
        let url = endpoint_url(&base, ["rooms", "1", "messages"]).unwrap();

        let bare = url_with_query(&url, &[]);
        assert!(!bare.as_str().contains('?'));

        let query = vec![("force".to_string(), "1".to_string())];
        let full = url_with_query(&url, &query);
        assert_eq!(full.as_str().matches('?').count(), 1);
        assert_eq!(full.query(), Some("force=1"));
    }

    #[test]
    fn encode_form_round_trips() {
        let pairs = vec![
            ("self_unread".to_string(), "0".to_string()),
            ("body".to_string(), "hello world & more".to_string()),
        ];
        let encoded = encode_form(&pairs);
        let decoded: Vec<(String, String)> = form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(decoded, pairs);
    }

    #[test]
    fn encode_form_distinguishes_empty_map_from_empty_values() {
        assert_eq!(encode_form(&[]), "");
        let pairs = vec![("body".to_string(), String::new())];
        assert_eq!(encode_form(&pairs), "body=");
    }
}
