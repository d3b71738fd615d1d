//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder LA session de calcul (évaluateur + écran + magasin d’historique)
//! et exposer ce que la vue doit lire. Aucune logique de calcul ici :
//! chaque clic / touche devient une `Commande` transmise au noyau.

use crate::noyau::evaluateur::Etat;
use crate::noyau::format::format_nombre;
use crate::noyau::{Commande, EcranTexte, MagasinHistorique, Session};

/// Magasin choisi au démarrage (fichier en natif, localStorage en web).
pub type MagasinBoxe = Box<dyn MagasinHistorique>;

pub struct AppCalc {
    session: Session<EcranTexte, MagasinBoxe>,
}

impl AppCalc {
    pub fn new(magasin: MagasinBoxe) -> Self {
        Self {
            session: Session::ouvrir(EcranTexte::default(), magasin),
        }
    }

    /* ------------------------ Actions ------------------------ */

    pub fn traiter(&mut self, cmd: Commande) {
        self.session.traiter(cmd);
    }

    /// C : même effet que le bouton.
    pub fn clear_entree(&mut self) {
        self.traiter(Commande::Effacer);
    }

    /* ------------------------ Lecture pour la vue ------------------------ */

    pub fn affichage(&self) -> &str {
        self.session.ecran().texte()
    }

    /// Rappel de l’opération en attente ("7 *"), vide sinon.
    pub fn rappel_operation(&self) -> String {
        match self.session.evaluateur().etat() {
            Etat::AttenteOperande(op) | Etat::Saisie(op) => {
                format!("{} {}", format_nombre(op.gauche), op.operateur)
            }
            Etat::Repos | Etat::Erreur => String::new(),
        }
    }

    /// Indicateur "M" quand la mémoire n’est pas nulle.
    pub fn memoire_active(&self) -> bool {
        self.session.evaluateur().memoire() != 0.0
    }

    /// Historique, du plus ancien au plus récent (la vue inverse).
    pub fn historique(&self) -> &[String] {
        self.session.evaluateur().historique()
    }
}
