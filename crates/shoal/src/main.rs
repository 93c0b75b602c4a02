use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shoal_catalog::{display_color, to_hex, GeneCatalog};
use shoal_genetics::{
    rng::{self, SeededRng},
    valuation::value_breakdown,
    Breeder, Genotype, GrowthStage, Individual,
};

mod config;

use crate::config::ShoalConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate random starter genotypes
    Random {
        /// Number of genotypes to generate
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write `fish_<n>.ron` files into (stdout when unset)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Breed two RON genotypes
    Breed {
        maternal: PathBuf,
        paternal: PathBuf,

        /// Number of offspring
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write `offspring_<n>.ron` files into (stdout when unset)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Price a RON genotype
    Value {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "adult")]
        stage: Stage,

        /// Stamina (0 - 100)
        #[arg(long, default_value = "100")]
        stamina: f32,

        #[arg(long)]
        sick: bool,
    },

    /// Show phenotype, display color and spot parameters of a RON genotype
    Inspect { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Stage {
    Immature,
    Juvenile,
    Adult,
}

impl From<Stage> for GrowthStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Immature => GrowthStage::Immature,
            Stage::Juvenile => GrowthStage::Juvenile,
            Stage::Adult => GrowthStage::Adult,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ShoalConfig::load()?;
    let catalog = config.catalog.load_catalog()?;

    match args.command {
        Command::Random { count, seed, out } => {
            let mut breeder = breeder(&config, catalog, seed);
            log::info!("Generating {} random genotypes", count);
            for index in 0..count {
                let genotype = breeder.random_genotype();
                emit(&genotype, out.as_deref(), &format!("fish_{}.ron", index))?;
            }
        }
        Command::Breed {
            maternal,
            paternal,
            count,
            seed,
            out,
        } => {
            let maternal = read_genotype(&maternal)?;
            let paternal = read_genotype(&paternal)?;
            let mut breeder = breeder(&config, catalog, seed);

            let litter = breeder
                .breed_litter(&maternal, &paternal, count)
                .context("Failed to breed")?;
            for (index, outcome) in litter.iter().enumerate() {
                for mutation in &outcome.mutations {
                    log::info!(
                        "Offspring {}: {:?} mutation ({})",
                        index,
                        mutation.kind,
                        mutation.gene
                    );
                }
                emit(
                    &outcome.genotype,
                    out.as_deref(),
                    &format!("offspring_{}.ron", index),
                )?;
            }
        }
        Command::Value {
            file,
            stage,
            stamina,
            sick,
        } => {
            let individual = Individual {
                genotype: read_genotype(&file)?,
                stage: stage.into(),
                stamina,
                sick,
            };
            let breakdown = value_breakdown(&individual, &catalog);
            log::debug!("{:#?}", breakdown);
            println!("{}", breakdown.total());
        }
        Command::Inspect { file } => {
            let genotype = read_genotype(&file)?;
            inspect(&genotype, &catalog)?;
        }
    }

    Ok(())
}

fn breeder(config: &ShoalConfig, catalog: GeneCatalog, seed: Option<u64>) -> Breeder<SeededRng> {
    let rng = match seed {
        Some(seed) => rng::seeded(seed),
        None => rng::from_entropy(),
    };
    Breeder::new(config.breeding.clone(), catalog, rng)
}

fn read_genotype(path: &Path) -> Result<Genotype> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Genotype::from_ron(&source).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write a genotype into `dir/name`, or print it when no directory is given
fn emit(genotype: &Genotype, dir: Option<&Path>, name: &str) -> Result<()> {
    let text = genotype.to_ron().context("Failed to serialize genotype")?;
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let path = dir.join(name);
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn inspect(genotype: &Genotype, catalog: &GeneCatalog) -> Result<()> {
    let expressed = genotype.phenotype(catalog);
    let color = display_color(catalog, expressed, genotype.clamped_lightness());

    let mut counts: Vec<_> = genotype.genome.counts().into_iter().collect();
    counts.sort();

    println!("Phenotype:  {} {}", expressed, to_hex(color));
    println!("Generation: {}", genotype.generational.generation);
    println!("Lightness:  {:.1}", genotype.clamped_lightness());
    println!("Genome:");
    for (gene, count) in counts {
        println!("  {:<10} x{}", gene, count);
    }

    println!("Spots: {}", genotype.spots.len());
    for spot in &genotype.spots {
        let shape = spot
            .shape
            .map(|shape| format!("{:?}", shape))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  ({:5.1}, {:5.1}) size {:4.1} {} {}",
            spot.x,
            spot.y,
            spot.size,
            spot.color,
            shape
        );
    }

    match genotype
        .spot_phenotype()
        .context("Failed to express spot traits")?
    {
        Some(phenotype) => println!("Spot traits: {:#?}", phenotype),
        None => println!("Spot traits: none"),
    }

    Ok(())
}
