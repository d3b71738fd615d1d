//! Magasin d’historique : persistance clé/valeur d’une liste de lignes d’affichage.
//!
//! Format stocké : tableau JSON de chaînes, ordre chronologique (plus ancien d’abord).
//! L’ordre “plus récent d’abord” est l’affaire de la vue, pas du magasin.
//!
//! Implémentations :
//! - `MagasinMemoire` : tests / repli si aucun emplacement disque
//! - `MagasinFichier` : natif (fichier JSON sous le répertoire de données)
//! - `MagasinLocal`   : wasm32 (localStorage du navigateur)

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Clé de stockage (nom du fichier / clé localStorage).
pub const CLE_HISTORIQUE: &str = "calc_history";

/// Variable d’environnement qui force le chemin du fichier d’historique (natif).
#[cfg(not(target_arch = "wasm32"))]
pub const VAR_CHEMIN_HISTORIQUE: &str = "CALC_HISTORIQUE";

#[derive(Debug, Error)]
pub enum ErreurHistorique {
    #[error("accès au fichier d’historique impossible : {0}")]
    Io(#[from] std::io::Error),

    #[error("historique illisible (JSON) : {0}")]
    Json(#[from] serde_json::Error),

    #[error("stockage indisponible : {0}")]
    Indisponible(String),
}

pub trait MagasinHistorique {
    /// Lecture au démarrage. Rien de stocké => liste vide.
    fn charger(&self) -> Result<Vec<String>, ErreurHistorique>;

    /// Écriture complète (write-through après chaque ajout).
    fn persister(&mut self, entrees: &[String]) -> Result<(), ErreurHistorique>;

    /// Effacement explicite de l’historique.
    fn vider(&mut self) -> Result<(), ErreurHistorique> {
        self.persister(&[])
    }
}

impl<M: MagasinHistorique + ?Sized> MagasinHistorique for Box<M> {
    fn charger(&self) -> Result<Vec<String>, ErreurHistorique> {
        (**self).charger()
    }

    fn persister(&mut self, entrees: &[String]) -> Result<(), ErreurHistorique> {
        (**self).persister(entrees)
    }

    fn vider(&mut self) -> Result<(), ErreurHistorique> {
        (**self).vider()
    }
}

/// Valeur finale d’une ligne ("3 + 4 = 7" -> "7", "sqrt(1,000,000) = 1,000" -> "1,000").
pub fn valeur_finale(ligne: &str) -> &str {
    ligne.rsplit('=').next().unwrap_or(ligne).trim()
}

fn decoder(json: &str) -> Result<Vec<String>, ErreurHistorique> {
    Ok(serde_json::from_str(json)?)
}

fn encoder(entrees: &[String]) -> Result<String, ErreurHistorique> {
    Ok(serde_json::to_string(entrees)?)
}

/* ------------------------ Mémoire ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct MagasinMemoire {
    entrees: Vec<String>,
    ecritures: usize,
}

impl MagasinMemoire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec(entrees: Vec<String>) -> Self {
        Self {
            entrees,
            ecritures: 0,
        }
    }

    pub fn entrees(&self) -> &[String] {
        &self.entrees
    }

    /// Nombre d’écritures reçues (persister + vider).
    pub fn ecritures(&self) -> usize {
        self.ecritures
    }
}

impl MagasinHistorique for MagasinMemoire {
    fn charger(&self) -> Result<Vec<String>, ErreurHistorique> {
        Ok(self.entrees.clone())
    }

    fn persister(&mut self, entrees: &[String]) -> Result<(), ErreurHistorique> {
        self.entrees = entrees.to_vec();
        self.ecritures += 1;
        Ok(())
    }
}

/* ------------------------ Fichier (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct MagasinFichier {
    chemin: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl MagasinFichier {
    pub fn new(chemin: impl Into<PathBuf>) -> Self {
        Self {
            chemin: chemin.into(),
        }
    }

    /// `$CALC_HISTORIQUE`, sinon `<data_dir>/calculatrice_accu/calc_history.json`.
    pub fn chemin_par_defaut() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(VAR_CHEMIN_HISTORIQUE) {
            if !p.is_empty() {
                return Some(PathBuf::from(p));
            }
        }
        dirs::data_dir().map(|d| {
            d.join(env!("CARGO_PKG_NAME"))
                .join(format!("{CLE_HISTORIQUE}.json"))
        })
    }

    pub fn chemin(&self) -> &Path {
        &self.chemin
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MagasinHistorique for MagasinFichier {
    fn charger(&self) -> Result<Vec<String>, ErreurHistorique> {
        match std::fs::read_to_string(&self.chemin) {
            Ok(json) => decoder(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persister(&mut self, entrees: &[String]) -> Result<(), ErreurHistorique> {
        if let Some(parent) = self.chemin.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.chemin, encoder(entrees)?)?;
        Ok(())
    }
}

/* ------------------------ localStorage (wasm32) ------------------------ */

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct MagasinLocal {
    cle: String,
}

#[cfg(target_arch = "wasm32")]
impl MagasinLocal {
    pub fn new(cle: impl Into<String>) -> Self {
        Self { cle: cle.into() }
    }

    fn stockage(&self) -> Result<web_sys::Storage, ErreurHistorique> {
        let w = web_sys::window()
            .ok_or_else(|| ErreurHistorique::Indisponible("window() indisponible".into()))?;
        w.local_storage()
            .map_err(|e| ErreurHistorique::Indisponible(format!("{e:?}")))?
            .ok_or_else(|| ErreurHistorique::Indisponible("localStorage absent".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl MagasinHistorique for MagasinLocal {
    fn charger(&self) -> Result<Vec<String>, ErreurHistorique> {
        let brut = self
            .stockage()?
            .get_item(&self.cle)
            .map_err(|e| ErreurHistorique::Indisponible(format!("{e:?}")))?;
        match brut {
            Some(json) => decoder(&json),
            None => Ok(Vec::new()),
        }
    }

    fn persister(&mut self, entrees: &[String]) -> Result<(), ErreurHistorique> {
        let json = encoder(entrees)?;
        self.stockage()?
            .set_item(&self.cle, &json)
            .map_err(|e| ErreurHistorique::Indisponible(format!("{e:?}")))
    }
}
