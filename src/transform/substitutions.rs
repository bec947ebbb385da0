//! Phrase substitution tables. Keys match case-insensitively on word
//! boundaries; an empty replacement deletes the phrase.


/// Meat and seafood to plant-based stand-ins; cuts of meat are dropped
pub const VEGETARIAN: &[(&str, &str)] = &[
    ("chicken broth", "vegetable broth"),
    ("chicken", "extra-firm tofu, cubed"),
    ("sausage", "plant-based sausage"),
    ("beef", "mushrooms"),
    ("pork", "tempeh"),
    ("fish", "cauliflower steak"),
    ("gelatin", "agar-agar"),
    ("bacon", "coconut bacon"),
    ("meatballs", "lentil balls"),
    ("shrimp", "jackfruit"),
    ("mussels", "mushrooms"),
    ("squid", "king oyster mushroom"),
    ("bone", ""),
    ("breast", ""),
    ("thigh", ""),
    ("drumstick", ""),
    ("wing", ""),
    ("rib", ""),
    ("cutlet", ""),
];

/// Plant-based proteins back to meat
pub const NON_VEGETARIAN: &[(&str, &str)] = &[
    ("vegetable broth", "chicken broth"),
    ("tofu", "chicken"),
    ("black beans", "beef"),
    ("kidney beans", "pork"),
    ("zucchini slices", "fish"),
    ("agar", "gelatin"),
    ("tempeh", "bacon"),
    ("chickpeas", "shrimp"),
    ("plant-based", ""),
    ("vegetarian", ""),
    ("portobello mushrooms", "steak"),
    ("crumbled tofu", "ground beef"),
];

pub const HEALTHY: &[(&str, &str)] = &[
    ("butter", "applesauce"),
    ("sugar", "honey"),
    ("heavy cream", "Greek yogurt"),
    ("salt", "herbs"),
    ("bacon", "turkey bacon"),
    ("beef", "lean turkey"),
    ("frying", "baking"),
];

pub const UNHEALTHY: &[(&str, &str)] = &[
    ("applesauce", "butter"),
    ("honey", "sugar"),
    ("Greek yogurt", "heavy cream"),
    ("herbs", "salt"),
    ("turkey bacon", "bacon"),
    ("lean turkey", "beef"),
    ("baking", "frying"),
];

pub const ITALIAN: &[(&str, &str)] = &[
    ("rice", "risotto"),
    ("bread", "ciabatta"),
    ("tomatoes", "San Marzano tomatoes"),
    ("onions", "shallots"),
    ("vegetable oil", "olive oil"),
    ("chicken", "prosciutto"),
    ("ground beef", "Italian sausage"),
    ("cheddar cheese", "parmesan cheese"),
    ("cream", "mascarpone cheese"),
    ("butter", "extra virgin olive oil"),
    ("corn", "zucchini"),
    ("herbs", "basil"),
    ("potatoes", "polenta"),
    ("spices", "Italian seasoning"),
    ("stock", "chicken stock with white wine"),
    ("pasta", "spaghetti"),
];

pub const MEXICAN: &[(&str, &str)] = &[
    ("rice", "Mexican rice"),
    ("bread", "corn tortillas"),
    ("tomatoes", "fire-roasted tomatoes"),
    ("onions", "white onions"),
    ("vegetable oil", "lard"),
    ("chicken", "shredded chicken"),
    ("ground beef", "chorizo"),
    ("cheddar cheese", "queso fresco"),
    ("cream", "crema"),
    ("butter", "avocado oil"),
    ("zucchini", "corn"),
    ("herbs", "cilantro"),
    ("potatoes", "sweet potatoes"),
    ("spices", "chili powder and cumin"),
    ("stock", "chicken stock with lime"),
    ("pasta", "tortilla strips"),
];

/// Wheat, barley and rye products to gluten-free alternatives
pub const GLUTEN_FREE: &[(&str, &str)] = &[
    ("flour", "gluten-free flour"),
    ("whole wheat flour", "almond flour"),
    ("all-purpose flour", "coconut flour"),
    ("semolina", "cornmeal"),
    ("spelt", "sorghum flour"),
    ("bulgur", "quinoa"),
    ("couscous", "quinoa"),
    ("farro", "millet"),
    ("barley", "brown rice"),
    ("rye", "oats"),
    ("kamut", "teff"),
    ("bread", "gluten-free bread"),
    ("bagels", "gluten-free bagels"),
    ("crackers", "rice crackers"),
    ("croissants", "gluten-free croissants"),
    ("pizza crust", "cauliflower crust"),
    ("muffins", "gluten-free muffins"),
    ("pancakes", "gluten-free pancakes"),
    ("waffles", "gluten-free waffles"),
    ("pasta", "gluten-free pasta"),
    ("spaghetti", "rice noodles"),
    ("lasagna sheets", "zucchini slices"),
    ("beer", "gluten-free beer"),
    ("ale", "cider"),
    ("breadcrumbs", "gluten-free breadcrumbs"),
    ("croutons", "gluten-free croutons"),
    ("graham crackers", "gluten-free graham crackers"),
    ("cookies", "gluten-free cookies"),
    ("cakes", "gluten-free cakes"),
    ("donuts", "gluten-free donuts"),
    ("cereal", "gluten-free cereal"),
    ("granola", "gluten-free granola"),
    ("oatmeal", "certified gluten-free oats"),
];

/// Dairy to dairy-free alternatives
pub const LACTOSE_FREE: &[(&str, &str)] = &[
    ("milk", "almond milk"),
    ("whole milk", "coconut milk (canned or carton, depending on richness needed)"),
    ("skim milk", "rice milk"),
    ("buttermilk", "almond milk"),
    ("cream", "coconut cream"),
    ("whipping cream", "silken tofu blended with almond milk"),
    ("half-and-half", "oat milk creamer"),
    ("sour cream", "dairy-free sour cream"),
    ("yogurt", "coconut yogurt or almond yogurt"),
    ("butter", "vegan butter"),
    ("ghee", "lactose-free ghee or clarified butter"),
    ("cheese", "dairy-free cheese"),
    ("cream cheese", "dairy-free cream cheese"),
    ("cheddar cheese", "vegan cheddar cheese"),
    ("parmesan cheese", "nutritional yeast or vegan parmesan"),
    ("mozzarella cheese", "plant-based mozzarella cheese"),
    ("ricotta cheese", "tofu ricotta or cashew ricotta"),
    ("feta cheese", "crumbled tofu with lemon and herbs"),
    ("blue cheese", "vegan blue cheese or omit for a simpler flavor"),
    ("ice cream", "dairy-free ice cream"),
    ("whipped cream", "coconut whipped cream"),
    ("custard", "coconut milk custard"),
    ("pudding", "avocado or silken tofu-based pudding"),
    ("chocolate", "dairy-free dark chocolate"),
    ("milkshake", "smoothie with dairy-free milk"),
    ("coffee creamer", "almond creamer"),
];
