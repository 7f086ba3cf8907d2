use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,
}
