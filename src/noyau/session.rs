//! Session : un évaluateur + ses deux collaborateurs (écran, magasin d’historique).
//!
//! Après chaque commande :
//! - écran rafraîchi si le tampon a changé
//! - historique réécrit (write-through) s’il a changé
//!
//! Le stockage est “fire-and-forget” : un échec est journalisé, jamais remonté.

use tracing::{debug, info, warn};

use super::commande::Commande;
use super::evaluateur::{ChangementHistorique, Evaluateur};
use super::historique::MagasinHistorique;

/// Collaborateur d’affichage.
pub trait Ecran {
    fn afficher(&mut self, texte: &str);
}

/// Écran minimal : garde la dernière chaîne affichée (lue par la vue egui).
#[derive(Clone, Debug, Default)]
pub struct EcranTexte {
    texte: String,
}

impl EcranTexte {
    pub fn texte(&self) -> &str {
        &self.texte
    }
}

impl Ecran for EcranTexte {
    fn afficher(&mut self, texte: &str) {
        self.texte.clear();
        self.texte.push_str(texte);
    }
}

pub struct Session<E: Ecran, M: MagasinHistorique> {
    evaluateur: Evaluateur,
    ecran: E,
    magasin: M,
}

impl<E: Ecran, M: MagasinHistorique> Session<E, M> {
    /// Charge l’historique persisté puis affiche l’état initial.
    pub fn ouvrir(ecran: E, magasin: M) -> Self {
        let historique = match magasin.charger() {
            Ok(h) => {
                info!(entrees = h.len(), "historique chargé");
                h
            }
            Err(e) => {
                warn!(erreur = %e, "historique non chargé, on repart à vide");
                Vec::new()
            }
        };

        let mut session = Self {
            evaluateur: Evaluateur::avec_historique(historique),
            ecran,
            magasin,
        };
        session.rafraichir();
        session
    }

    pub fn traiter(&mut self, cmd: Commande) {
        debug!(?cmd, "commande");
        let reaction = self.evaluateur.appliquer(cmd);

        if reaction.rafraichir {
            self.rafraichir();
        }

        let ecriture = match reaction.historique {
            None => return,
            Some(ChangementHistorique::Ajout) => {
                self.magasin.persister(self.evaluateur.historique())
            }
            Some(ChangementHistorique::Vidage) => {
                info!("historique effacé");
                self.magasin.vider()
            }
        };

        if let Err(e) = ecriture {
            warn!(erreur = %e, "historique non persisté");
        }
    }

    fn rafraichir(&mut self) {
        let texte = self.evaluateur.affichage();
        self.ecran.afficher(&texte);
    }

    pub fn evaluateur(&self) -> &Evaluateur {
        &self.evaluateur
    }

    pub fn ecran(&self) -> &E {
        &self.ecran
    }

    pub fn magasin(&self) -> &M {
        &self.magasin
    }
}
