//! Business submission form values and the transport payload

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::SelectOption;
use crate::types::SiteContext;
use crate::validation::{optional_email, optional_url, required_text};

/// In-progress business submission as edited by the user
///
/// Wire names match the submission endpoint's expectations exactly, so the
/// URL fields carry explicit renames.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormValues {
    #[validate(
        custom = "required_text",
        length(max = 100, message = "Must be 100 characters or less")
    )]
    #[serde(default)]
    pub name: String,
    #[validate(custom = "optional_email")]
    #[serde(default)]
    pub submitter_email: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "websiteURL")]
    pub website_url: String,
    #[validate(required(message = "Required"))]
    #[serde(default)]
    pub location: Option<SelectOption>,
    #[validate(required(message = "Required"))]
    #[serde(default)]
    pub category: Option<SelectOption>,
    #[serde(default)]
    pub tags: Vec<SelectOption>,
    #[validate(
        custom = "required_text",
        length(max = 200, message = "Must be 200 characters or less")
    )]
    #[serde(default)]
    pub description: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "imageURL")]
    pub image_url: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "instagramProfileURL")]
    pub instagram_profile_url: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "facebookPageURL")]
    pub facebook_page_url: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "twitterProfileURL")]
    pub twitter_profile_url: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "giftCardURL")]
    pub gift_card_url: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "onlineStoreURL")]
    pub online_store_url: String,
    #[serde(default)]
    pub supports_takeout: bool,
    #[serde(default)]
    pub supports_delivery: bool,
    #[serde(default)]
    pub sells_food: bool,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, rename = "orderFoodURL")]
    pub order_food_url: String,
    #[serde(default, rename = "orderGroceriesURL")]
    pub order_groceries_url: String,
    #[serde(default)]
    pub supports_uber_eats: bool,
    #[serde(default)]
    pub supports_skip_the_dishes: bool,
    #[serde(default)]
    pub supports_grub_hub: bool,
    #[serde(default)]
    pub supports_foodora: bool,
    #[serde(default)]
    pub supports_door_dash: bool,
    #[serde(default)]
    pub ordering_instructions: String,
    #[validate(custom = "optional_url")]
    #[serde(default, rename = "donationsURL")]
    pub donations_url: String,
    #[serde(default, rename = "siteID")]
    pub site_id: String,
    #[serde(default)]
    pub site_name: String,
}

impl SubmitFormValues {
    /// Empty form scoped to a site
    pub fn new(site: &SiteContext) -> Self {
        Self {
            site_id: site.id.clone(),
            site_name: site.region_name.clone(),
            ..Default::default()
        }
    }

    /// Shape validated values into the payload the submission endpoint accepts
    ///
    /// Tags are flattened to their labels joined with ", " and every field in
    /// [`URL_FIELD_TRANSFORMS`] is rewritten when non-empty. Callers validate
    /// first; this does not.
    pub fn to_payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload {
            name: self.name.clone(),
            submitter_email: self.submitter_email.clone(),
            website_url: self.website_url.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            tags: join_tag_labels(&self.tags),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            instagram_profile_url: self.instagram_profile_url.clone(),
            facebook_page_url: self.facebook_page_url.clone(),
            twitter_profile_url: self.twitter_profile_url.clone(),
            gift_card_url: self.gift_card_url.clone(),
            online_store_url: self.online_store_url.clone(),
            supports_takeout: self.supports_takeout,
            supports_delivery: self.supports_delivery,
            sells_food: self.sells_food,
            phone_number: self.phone_number.clone(),
            order_food_url: self.order_food_url.clone(),
            order_groceries_url: self.order_groceries_url.clone(),
            supports_uber_eats: self.supports_uber_eats,
            supports_skip_the_dishes: self.supports_skip_the_dishes,
            supports_grub_hub: self.supports_grub_hub,
            supports_foodora: self.supports_foodora,
            supports_door_dash: self.supports_door_dash,
            ordering_instructions: self.ordering_instructions.clone(),
            donations_url: self.donations_url.clone(),
            site_id: self.site_id.clone(),
            site_name: self.site_name.clone(),
        };

        for (field, transform) in URL_FIELD_TRANSFORMS {
            let slot = field.slot(&mut payload);
            if !slot.is_empty() {
                let rewritten = transform(slot);
                *slot = rewritten;
            }
        }

        payload
    }
}

/// Body POSTed to the submission endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub submitter_email: String,
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    pub location: Option<SelectOption>,
    pub category: Option<SelectOption>,
    /// Tag labels joined with ", "
    pub tags: String,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "instagramProfileURL")]
    pub instagram_profile_url: String,
    #[serde(rename = "facebookPageURL")]
    pub facebook_page_url: String,
    #[serde(rename = "twitterProfileURL")]
    pub twitter_profile_url: String,
    #[serde(rename = "giftCardURL")]
    pub gift_card_url: String,
    #[serde(rename = "onlineStoreURL")]
    pub online_store_url: String,
    pub supports_takeout: bool,
    pub supports_delivery: bool,
    pub sells_food: bool,
    pub phone_number: String,
    #[serde(rename = "orderFoodURL")]
    pub order_food_url: String,
    #[serde(rename = "orderGroceriesURL")]
    pub order_groceries_url: String,
    pub supports_uber_eats: bool,
    pub supports_skip_the_dishes: bool,
    pub supports_grub_hub: bool,
    pub supports_foodora: bool,
    pub supports_door_dash: bool,
    pub ordering_instructions: String,
    #[serde(rename = "donationsURL")]
    pub donations_url: String,
    #[serde(rename = "siteID")]
    pub site_id: String,
    pub site_name: String,
}

/// URL-valued form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlField {
    Website,
    Image,
    FacebookPage,
    InstagramProfile,
    TwitterProfile,
    GiftCard,
    OnlineStore,
    Donations,
}

impl UrlField {
    pub const ALL: [UrlField; 8] = [
        UrlField::Website,
        UrlField::Image,
        UrlField::FacebookPage,
        UrlField::InstagramProfile,
        UrlField::TwitterProfile,
        UrlField::GiftCard,
        UrlField::OnlineStore,
        UrlField::Donations,
    ];

    /// Field name on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            UrlField::Website => "websiteURL",
            UrlField::Image => "imageURL",
            UrlField::FacebookPage => "facebookPageURL",
            UrlField::InstagramProfile => "instagramProfileURL",
            UrlField::TwitterProfile => "twitterProfileURL",
            UrlField::GiftCard => "giftCardURL",
            UrlField::OnlineStore => "onlineStoreURL",
            UrlField::Donations => "donationsURL",
        }
    }

    /// Field name on the Rust struct
    pub fn field_name(self) -> &'static str {
        match self {
            UrlField::Website => "website_url",
            UrlField::Image => "image_url",
            UrlField::FacebookPage => "facebook_page_url",
            UrlField::InstagramProfile => "instagram_profile_url",
            UrlField::TwitterProfile => "twitter_profile_url",
            UrlField::GiftCard => "gift_card_url",
            UrlField::OnlineStore => "online_store_url",
            UrlField::Donations => "donations_url",
        }
    }

    fn slot(self, payload: &mut SubmissionPayload) -> &mut String {
        match self {
            UrlField::Website => &mut payload.website_url,
            UrlField::Image => &mut payload.image_url,
            UrlField::FacebookPage => &mut payload.facebook_page_url,
            UrlField::InstagramProfile => &mut payload.instagram_profile_url,
            UrlField::TwitterProfile => &mut payload.twitter_profile_url,
            UrlField::GiftCard => &mut payload.gift_card_url,
            UrlField::OnlineStore => &mut payload.online_store_url,
            UrlField::Donations => &mut payload.donations_url,
        }
    }
}

pub type FieldTransform = fn(&str) -> String;

fn lowercase(value: &str) -> String {
    value.to_lowercase()
}

/// Rewrites applied to URL fields before POSTing; the content backend
/// rejects mixed-case URLs.
pub const URL_FIELD_TRANSFORMS: [(UrlField, FieldTransform); 8] = [
    (UrlField::Website, lowercase),
    (UrlField::Image, lowercase),
    (UrlField::FacebookPage, lowercase),
    (UrlField::InstagramProfile, lowercase),
    (UrlField::TwitterProfile, lowercase),
    (UrlField::GiftCard, lowercase),
    (UrlField::OnlineStore, lowercase),
    (UrlField::Donations, lowercase),
];

/// Join tag labels in list order
pub fn join_tag_labels(tags: &[SelectOption]) -> String {
    tags.iter()
        .map(|tag| tag.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
