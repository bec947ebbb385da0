use clap::Parser;
use env_logger::Env;
use log::debug;
use recipe_transform::{
    fetch_recipe, transform, Recipe, RecipeParser, Settings, Transformation, TransformationReport,
};

/// Parse a recipe page and print it, optionally transformed
#[derive(Parser, Debug)]
#[command(name = "recipe-transform", version, about)]
struct Args {
    /// Recipe page to fetch
    url: String,

    /// Transformation to apply: vegetarian, non-vegetarian, healthy,
    /// unhealthy, double, half, italian, mexican, gluten-free, lactose-free.
    /// May be given more than once.
    #[arg(short, long = "transform", value_name = "KIND")]
    transforms: Vec<Transformation>,

    /// Save a report per transformation into the configured output directory
    #[arg(long)]
    save: bool,

    /// Print recipes as JSON
    #[arg(long)]
    json: bool,

    /// Spell out unit abbreviations ("tbsp." -> "tablespoon")
    #[arg(long)]
    expand_units: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let settings = Settings::load()?;
    debug!("{settings:#?}");
    let parser = RecipeParser::from_settings(&settings)?;

    let mut recipe = fetch_recipe(&args.url, &parser, &settings).await?;
    if args.expand_units {
        expand_units(&mut recipe);
    }
    print_recipe(&recipe, args.json)?;

    for &transformation in &args.transforms {
        let transformed = transform(&recipe, transformation);
        println!();
        print_recipe(&transformed, args.json)?;

        if args.save {
            let report = TransformationReport::new(transformation, &recipe, &transformed);
            let path = report.save(&settings.output.directory)?;
            println!("\nRecipe saved to {}", path.display());
        }
    }

    Ok(())
}

fn expand_units(recipe: &mut Recipe) {
    for ingredient in &mut recipe.ingredients {
        ingredient.unit = ingredient.standardized_unit();
    }
}

fn print_recipe(recipe: &Recipe, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
    } else {
        print!("{recipe}");
    }
    Ok(())
}
