use std::fmt;
use std::path::{Path, PathBuf};

/// On-screen targets located through their reference screenshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    AtomicDisplacement,
    EquivalentFluence,
    CalculationParameters,
    ProtonEquivalentFluence,
    ElectronEquivalentFluence,
    EnergyRangeNielCurves,
    YourNielData,
    NielElectrons,
    Ok,
    OutputFile,
    Calculation,
}

impl Button {
    pub const ALL: [Button; 11] = [
        Button::AtomicDisplacement,
        Button::EquivalentFluence,
        Button::CalculationParameters,
        Button::ProtonEquivalentFluence,
        Button::ElectronEquivalentFluence,
        Button::EnergyRangeNielCurves,
        Button::YourNielData,
        Button::NielElectrons,
        Button::Ok,
        Button::OutputFile,
        Button::Calculation,
    ];

    /// Template alias, also the image file stem
    pub fn alias(self) -> &'static str {
        match self {
            Button::AtomicDisplacement => "atomic_displacement",
            Button::EquivalentFluence => "equivalent_fluence",
            Button::CalculationParameters => "calculation_parameters",
            Button::ProtonEquivalentFluence => "proton_equivalent_fluence",
            Button::ElectronEquivalentFluence => "electron_equivalent_fluence",
            Button::EnergyRangeNielCurves => "energy_range_niel_curves",
            Button::YourNielData => "your_niel_data",
            Button::NielElectrons => "niel_electrons",
            Button::Ok => "ok",
            Button::OutputFile => "output_file",
            Button::Calculation => "calculation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::AtomicDisplacement => "Atomic Displacement",
            Button::EquivalentFluence => "Equivalent Fluence",
            Button::CalculationParameters => "Calculation Parameters",
            Button::ProtonEquivalentFluence => "Proton Equivalent Fluence",
            Button::ElectronEquivalentFluence => "Electron Equivalent Fluence",
            Button::EnergyRangeNielCurves => "Energy Range (NIEL curves)",
            Button::YourNielData => "Your NIEL Data",
            Button::NielElectrons => "NIEL Electrons",
            Button::Ok => "OK",
            Button::OutputFile => "Output File",
            Button::Calculation => "Calculation",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.png", self.alias())
    }

    pub fn template_path(self, images_dir: &Path) -> PathBuf {
        images_dir.join(self.file_name())
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_button_has_a_distinct_image() {
        let names: HashSet<String> = Button::ALL.iter().map(|b| b.file_name()).collect();
        assert_eq!(names.len(), Button::ALL.len());
        assert!(names.contains("energy_range_niel_curves.png"));
        assert!(names.contains("ok.png"));
    }

    #[test]
    fn template_path_joins_images_dir() {
        let path = Button::OutputFile.template_path(Path::new("images"));
        assert_eq!(path, Path::new("images").join("output_file.png"));
    }
}
