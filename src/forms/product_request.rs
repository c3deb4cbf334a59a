use serde::Deserialize;
use validator::Validate;

use crate::domain::client::ProductRequest;
use crate::domain::types::{Notes, ProductLink, ProductTitle};
use crate::forms::FormError;

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for recording a product a client asked for.
pub struct AddProductRequestForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[validate(url)]
    pub link: Option<String>,
}

impl TryFrom<AddProductRequestForm> for ProductRequest {
    type Error = FormError;

    fn try_from(form: AddProductRequestForm) -> Result<Self, Self::Error> {
        let link = form
            .link
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let form = AddProductRequestForm { link, ..form };
        form.validate()?;

        let title =
            ProductTitle::new(form.title).map_err(|_| FormError::InvalidProductRequest)?;
        let link = form
            .link
            .map(ProductLink::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        ProductRequest::new(title, form.quantity, Notes::new(form.notes), link)
            .map_err(|_| FormError::InvalidProductRequest)
    }
}
