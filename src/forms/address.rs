use serde::Deserialize;
use validator::Validate;

use crate::domain::client::Address;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for adding a delivery address to a client.
pub struct AddAddressForm {
    #[validate(length(min = 1))]
    pub street: String,
    #[serde(default)]
    pub complex: String,
    #[validate(length(min = 1))]
    pub suburb: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub province: String,
    #[validate(length(min = 4, max = 4))]
    pub postal_code: String,
}

impl TryFrom<AddAddressForm> for Address {
    type Error = FormError;

    fn try_from(form: AddAddressForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let complex = form.complex.trim();
        Ok(Address {
            street: form.street.trim().to_string(),
            complex: (!complex.is_empty()).then(|| complex.to_string()),
            suburb: form.suburb.trim().to_string(),
            city: form.city.trim().to_string(),
            province: form.province.trim().to_string(),
            postal_code: form.postal_code.trim().to_string(),
        })
    }
}
