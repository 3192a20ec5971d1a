//! Fixed tag vocabulary offered on the submission form
//!
//! Submitters may still create new tags; these are the suggestions.

pub const STATIC_TAGS: &[&str] = &[
    "Alcohol",
    "Art",
    "Bakery",
    "Beer",
    "Books",
    "Bubble Tea",
    "Butcher",
    "Catering",
    "Cheese",
    "Chocolate",
    "Clothing",
    "Coffee",
    "Crafts",
    "Curbside Pickup",
    "Delivery",
    "Desserts",
    "Fitness",
    "Flowers",
    "Gifts",
    "Gift Cards",
    "Gluten Free",
    "Groceries",
    "Home Goods",
    "Ice Cream",
    "Jewellery",
    "Kids",
    "Local",
    "Meal Kits",
    "Music",
    "Non-Profit",
    "Online Classes",
    "Pet Supplies",
    "Pizza",
    "Plants",
    "Restaurant",
    "Spirits",
    "Takeout",
    "Tea",
    "Vegan",
    "Vegetarian",
    "Wine",
];
