//! Help texts bundled into the binary, keyed by topic

const INDEX: &str = include_str!("../assets/help/index.txt");

const TOPICS: [(&str, &str); 3] = [
    ("keys", include_str!("../assets/help/keys.txt")),
    ("search", include_str!("../assets/help/search.txt")),
    ("commands", include_str!("../assets/help/commands.txt")),
];

/// Title and text for a topic; the index for `None` or an unknown topic
pub fn lookup(topic: Option<&str>) -> (String, &'static str) {
    let Some(topic) = topic else {
        return ("Help".to_string(), INDEX);
    };

    TOPICS
        .iter()
        .find(|(name, _)| *name == topic)
        .map_or_else(
            || (format!("Help: no topic '{topic}'"), INDEX),
            |(name, text)| (format!("Help: {name}"), *text),
        )
}
