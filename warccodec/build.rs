use std::env;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ini::Ini;

fn main() {
    let base_path: PathBuf = env::var("OUT_DIR").unwrap().into();
    let ini_dir = "data/";
    println!("cargo:rerun-if-changed={}", ini_dir);

    for entry in std::fs::read_dir(ini_dir).expect("failed to read data dir") {
        let entry = entry.expect("error reading directory entry");
        let ini_path = entry.path();
        // Only try to read *.ini
        if ini_path.extension().map(|ext| ext != "ini").unwrap_or(true) {
            continue;
        }

        let ini = Ini::load_from_file(&ini_path).unwrap();
        generate_registry(&ini, &base_path).unwrap_or_else(|e| {
            panic!("Failed to generate registry from {:?}: {}", ini_path, e)
        });
    }
}

/// Emit `ALL`, `name()` and `from_name()` for a closed enum whose variants are listed in the
/// `[values]` section as `Variant = Name`.
fn generate_registry(ini: &Ini, base_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = base_path.to_owned().join(
        ini.general_section()
            .get("file")
            .expect("file property missing from ini general section"),
    );
    let type_name = ini
        .general_section()
        .get("type")
        .expect("type property missing from ini general section");
    let values = ini
        .section(Some("values"))
        .expect("values section missing from ini");

    let mut out = BufWriter::new(File::create(&out_path)?);
    let mut map = phf_codegen::Map::<String>::new();

    writeln!(
        &mut out,
        "impl {t} {{
    /// Every registered variant, in registry order.
    pub const ALL: &'static [{t}] = &[",
        t = type_name
    )?;
    for (variant, _) in values.iter() {
        writeln!(&mut out, "        {}::{},", type_name, variant)?;
    }
    writeln!(&mut out, "    ];\n")?;

    writeln!(
        &mut out,
        "    /// The registered name of this field, exactly as it appears in a record header.
    pub fn name(self) -> &'static str {{
        match self {{"
    )?;
    for (variant, repr) in values.iter() {
        writeln!(&mut out, "            {}::{} => \"{}\",", type_name, variant, repr)?;
        map.entry(repr.to_owned(), &format!("{}::{}", type_name, variant));
    }
    writeln!(&mut out, "        }}\n    }}\n")?;

    writeln!(
        &mut out,
        "    /// Look up a field by its exact (case-sensitive) registered name.
    pub fn from_name(name: &str) -> Option<{t}> {{
        static MAP: phf::Map<&'static str, {t}> = {m};

        MAP.get(name).copied()
    }}
}}",
        t = type_name,
        m = map.build()
    )?;
    Ok(())
}
