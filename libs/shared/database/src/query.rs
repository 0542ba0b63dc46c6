/// PostgREST query-string builder. Values are URL-encoded; column names are
/// trusted and passed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    parts: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.parts.push(format!("{}=eq.{}", column, urlencoding::encode(value)));
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.parts.push(format!("select={}", columns));
        self
    }

    pub fn order(mut self, column: &str) -> Self {
        self.parts.push(format!("order={}", column));
        self
    }

    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.parts.push(format!("on_conflict={}", columns));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!("?{}", self.parts.join("&"))
        }
    }
}
