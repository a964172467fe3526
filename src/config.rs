//! Mechanism for loading and sharing the selection configuration

use crate::{
    container::{ClusterContainer, ParticleContainer},
    evcut::EventCut,
    numeric::Float,
    Result,
};

use eyre::{ensure, eyre, WrapErr};
use tracing::info;

use std::{fs, path::Path, str::FromStr};

/// Selection run configuration
pub struct Configuration {
    /// Number of events to be processed
    pub num_events: usize,

    /// Largest number of particles in a generated event
    pub max_multiplicity: usize,

    /// Seed of the random number generator
    pub seed: u64,

    /// Selection of tracks/particles
    pub particles: ParticleContainer,

    /// Selection of calorimeter clusters
    pub clusters: ClusterContainer,

    /// Cuts on whole events
    pub event_cut: EventCut,
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and log it
    pub fn load(file_name: impl AsRef<Path>) -> Result<Self> {
        let file_name = file_name.as_ref();
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Could not read {}", file_name.display()))?;
        Self::parse(&config_str)
    }

    /// Parse configuration text, check it, and log it
    pub fn parse(config_str: &str) -> Result<Self> {
        // Configuration items are the first non-whitespace chunk of text on
        // each line, in a fixed order. Blank lines are ignored.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // Fetch the next configuration item, tagged with the name of the
        // configuration field which it is supposed to fill.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        let num_events = next_item("num_events")?.parse::<usize>()?;
        let max_multiplicity = next_item("max_multiplicity")?.parse::<usize>()?;
        let seed = next_item("seed")?.parse::<u64>()?;

        let array_name = next_item("array_name")?.parse::<String>()?;
        let mut particles = ParticleContainer::new("particles", array_name);
        particles.set_e_limits(
            next_item("min_e")?.parse::<Float>()?,
            next_item("max_e")?.parse::<Float>()?,
        );
        particles.set_pt_limits(
            next_item("min_pt")?.parse::<Float>()?,
            next_item("max_pt")?.parse::<Float>()?,
        );
        particles.set_eta_limits(
            next_item("min_eta")?.parse::<Float>()?,
            next_item("max_eta")?.parse::<Float>()?,
        );
        particles.set_phi_limits(
            next_item("min_phi")?.parse::<Float>()?,
            next_item("max_phi")?.parse::<Float>()?,
        );
        particles.set_mc_label_range(
            next_item("min_mc_label")?.parse::<i32>()?,
            next_item("max_mc_label")?.parse::<i32>()?,
        );
        particles.set_mass_hypothesis(next_item("mass_hypothesis")?.parse::<Float>()?);
        particles.set_bit_map(next_item("bit_map")?.parse::<u32>()?);

        let cluster_array_name = next_item("cluster_array_name")?.parse::<String>()?;
        let mut clusters = ClusterContainer::new("clusters", cluster_array_name);
        clusters.set_e_limits(
            next_item("cluster_min_e")?.parse::<Float>()?,
            next_item("cluster_max_e")?.parse::<Float>()?,
        );

        let event_cut = EventCut::new(
            [
                next_item("min_mult")?.parse::<usize>()?,
                next_item("max_mult")?.parse::<usize>()?,
            ],
            [
                next_item("min_vertex_z")?.parse::<Float>()?,
                next_item("max_vertex_z")?.parse::<Float>()?,
            ],
            next_item("accept_bad_vertex")?.parse_bool()?,
        );

        let config = Configuration {
            num_events,
            max_multiplicity,
            seed,
            particles,
            clusters,
            event_cut,
        };
        config.print();
        config.check()?;
        Ok(config)
    }

    /// Reject configurations which cannot select anything sensible
    fn check(&self) -> Result<()> {
        ensure!(self.num_events > 0, "Please process at least one event");

        let cuts = self.particles.cuts();
        ensure!(
            cuts.energy.min <= cuts.energy.max,
            "Particle energy range is inverted"
        );
        ensure!(cuts.pt.min <= cuts.pt.max, "Particle pt range is inverted");
        ensure!(
            cuts.min_mc_label < 0 || cuts.max_mc_label < 0 || cuts.min_mc_label <= cuts.max_mc_label,
            "Particle MC label range is inverted"
        );

        let cluster_energy = self.clusters.cuts().energy;
        ensure!(
            cluster_energy.min <= cluster_energy.max,
            "Cluster energy range is inverted"
        );

        let [min_mult, max_mult] = self.event_cut.multiplicity;
        ensure!(min_mult <= max_mult, "Multiplicity range is inverted");
        Ok(())
    }

    /// Log the configuration
    pub fn print(&self) {
        let cuts = self.particles.cuts();
        info!("NUM_EVENTS        : {}", self.num_events);
        info!("MAX_MULTIPLICITY  : {}", self.max_multiplicity);
        info!("SEED              : {}", self.seed);
        info!("ARRAY_NAME        : {}", self.particles.array_name());
        info!("E                 : [{}, {}]", cuts.energy.min, cuts.energy.max);
        info!("PT                : [{}, {}]", cuts.pt.min, cuts.pt.max);
        info!("ETA               : [{}, {}]", cuts.eta.min, cuts.eta.max);
        info!("PHI               : [{}, {}]", cuts.phi.min, cuts.phi.max);
        info!("MC_LABEL          : [{}, {}]", cuts.min_mc_label, cuts.max_mc_label);
        info!("MASS_HYPOTHESIS   : {}", cuts.mass_hypothesis);
        info!("BIT_MAP           : {:#x}", cuts.bit_map);
        let cluster_energy = self.clusters.cuts().energy;
        info!("CLUSTER_ARRAY     : {}", self.clusters.array_name());
        info!("CLUSTER_E         : [{}, {}]", cluster_energy.min, cluster_energy.max);
        let [min_mult, max_mult] = self.event_cut.multiplicity;
        let [min_z, max_z] = self.event_cut.vertex_z;
        info!("MULTIPLICITY      : [{}, {}]", min_mult, max_mult);
        info!("VERTEX_Z          : ]{}, {}[", min_z, max_z);
        info!("ACCEPT_BAD_VERTEX : {}", self.event_cut.accept_bad_vertex);
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }

    /// Parse this data as a boolean, also accepting Fortran's bool syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            ".true." => Ok(true),
            ".false." => Ok(false),
            _ => self.parse::<bool>(),
        }
    }
}
