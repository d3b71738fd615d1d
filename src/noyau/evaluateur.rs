//! Noyau : machine à états de la calculatrice (accumulateur à un opérateur en attente).
//!
//! États explicites :
//!
//! ```text
//!   Repos ──op──> AttenteOperande ──chiffre/point──> Saisie ──=──> Repos
//!     ^                 ^  |op (remplace)              |op (commit)
//!     |                 +--+<------------------------- +
//!     +──────────── C ──────────── Erreur <── ÷0 / √(<0)
//! ```
//!
//! Évaluation séquentielle gauche -> droite : `3 + 4 * 2` commit `3 + 4 = 7` avant `* 2`.
//! Pas de précédence, pas de pile : une seule opération en attente.
//!
//! Les erreurs (÷0, √ négatif) sont des DONNÉES (état `Erreur`, sentinelle "Error"),
//! jamais des `Err` : toutes les opérations sont totales.
//! Seul C (effacer) sort de l’état `Erreur`.

use std::f64::consts::PI;

use super::commande::{ActionMemoire, Chiffre, Commande, Fonction, Operateur};
use super::format::{format_nombre, format_tampon, SENTINELLE_ERREUR};
use super::tampon::Tampon;

/// Opérande gauche + opérateur, en attente de l’opérande droite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperationEnAttente {
    pub gauche: f64,
    pub operateur: Operateur,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Etat {
    /// Aucune opération en attente (démarrage, après `=`, après C).
    Repos,
    /// Opérateur choisi : la prochaine frappe REMPLACE le tampon.
    AttenteOperande(OperationEnAttente),
    /// Opérande droite en cours de frappe.
    Saisie(OperationEnAttente),
    /// Sentinelle "Error" à l’écran.
    Erreur,
}

/// Ce qui a changé pendant une commande (pour l’écran et le magasin d’historique).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub rafraichir: bool,
    pub historique: Option<ChangementHistorique>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangementHistorique {
    Ajout,
    Vidage,
}

impl Reaction {
    const RIEN: Reaction = Reaction {
        rafraichir: false,
        historique: None,
    };

    const ECRAN: Reaction = Reaction {
        rafraichir: true,
        historique: None,
    };

    const AJOUT: Reaction = Reaction {
        rafraichir: true,
        historique: Some(ChangementHistorique::Ajout),
    };
}

#[derive(Clone, Debug)]
pub struct Evaluateur {
    tampon: Tampon,
    etat: Etat,
    memoire: f64,
    historique: Vec<String>,
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self::avec_historique(Vec::new())
    }
}

impl Evaluateur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Démarre une session avec l’historique déjà persisté (ordre chronologique).
    pub fn avec_historique(historique: Vec<String>) -> Self {
        Self {
            tampon: Tampon::zero(),
            etat: Etat::Repos,
            memoire: 0.0,
            historique,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    /// Texte du tampon ("Error" en état d’erreur).
    pub fn tampon(&self) -> &str {
        match self.etat {
            Etat::Erreur => SENTINELLE_ERREUR,
            _ => self.tampon.as_str(),
        }
    }

    /// Chaîne à afficher (séparateurs de milliers).
    pub fn affichage(&self) -> String {
        format_tampon(self.tampon())
    }

    pub fn etat(&self) -> Etat {
        self.etat
    }

    pub fn operation_en_attente(&self) -> Option<OperationEnAttente> {
        match self.etat {
            Etat::AttenteOperande(op) | Etat::Saisie(op) => Some(op),
            Etat::Repos | Etat::Erreur => None,
        }
    }

    /// Vrai si la prochaine frappe remplace le tampon.
    pub fn remplacement(&self) -> bool {
        matches!(self.etat, Etat::AttenteOperande(_))
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    /// Historique, du plus ancien au plus récent.
    pub fn historique(&self) -> &[String] {
        &self.historique
    }

    fn en_erreur(&self) -> bool {
        matches!(self.etat, Etat::Erreur)
    }

    fn erreur(&mut self) -> Reaction {
        self.etat = Etat::Erreur;
        Reaction::ECRAN
    }

    /* ------------------------ Dispatch ------------------------ */

    pub fn appliquer(&mut self, cmd: Commande) -> Reaction {
        match cmd {
            Commande::Chiffre(c) => self.chiffre(c),
            Commande::Point => self.point(),
            Commande::Operateur(op) => self.operateur(op),
            Commande::Egal => self.calculer(),
            Commande::Fonction(f) => self.fonction(f),
            Commande::Memoire(a) => self.memoire_action(a),
            Commande::RetourArriere => self.retour_arriere(),
            Commande::Effacer => self.effacer(),
            Commande::ReutiliserHistorique(texte) => self.reutiliser(&texte),
            Commande::EffacerHistorique => self.effacer_historique(),
        }
    }

    /* ------------------------ Frappe ------------------------ */

    pub fn chiffre(&mut self, c: Chiffre) -> Reaction {
        match self.etat {
            Etat::Erreur => return Reaction::RIEN,
            Etat::AttenteOperande(op) => {
                self.tampon = Tampon::depuis_chiffre(c);
                self.etat = Etat::Saisie(op);
            }
            Etat::Repos | Etat::Saisie(_) => self.tampon.ajouter_chiffre(c),
        }
        Reaction::ECRAN
    }

    pub fn point(&mut self) -> Reaction {
        match self.etat {
            Etat::Erreur => return Reaction::RIEN,
            Etat::AttenteOperande(op) => {
                self.tampon = Tampon::zero_point();
                self.etat = Etat::Saisie(op);
            }
            Etat::Repos | Etat::Saisie(_) => self.tampon.ajouter_point(),
        }
        Reaction::ECRAN
    }

    pub fn retour_arriere(&mut self) -> Reaction {
        match self.etat {
            Etat::Erreur | Etat::AttenteOperande(_) => Reaction::RIEN,
            Etat::Repos | Etat::Saisie(_) => {
                self.tampon.retirer_dernier();
                Reaction::ECRAN
            }
        }
    }

    /// C : tampon à "0", plus d’opération en attente. Mémoire et historique intacts.
    pub fn effacer(&mut self) -> Reaction {
        self.tampon = Tampon::zero();
        self.etat = Etat::Repos;
        Reaction::ECRAN
    }

    /* ------------------------ Opérateurs ------------------------ */

    /// Choisit l’opérateur ; commit d’abord l’opération en attente si une opérande
    /// droite a été tapée depuis.
    pub fn operateur(&mut self, operateur: Operateur) -> Reaction {
        let mut reaction = Reaction::RIEN;

        match self.etat {
            Etat::Erreur => return Reaction::RIEN,
            Etat::Saisie(_) => {
                reaction = self.calculer();
                // ÷0 pendant le commit : on reste en erreur
                if self.en_erreur() {
                    return reaction;
                }
            }
            Etat::Repos | Etat::AttenteOperande(_) => {}
        }

        self.etat = Etat::AttenteOperande(OperationEnAttente {
            gauche: self.tampon.valeur(),
            operateur,
        });
        reaction
    }

    /// `=` : applique l’opération en attente à l’opérande droite du tampon.
    pub fn calculer(&mut self) -> Reaction {
        let Etat::Saisie(op) = self.etat else {
            // rien en attente, ou rien tapé depuis l’opérateur
            return Reaction::RIEN;
        };

        let gauche = op.gauche;
        let droite = self.tampon.valeur();

        let resultat = match op.operateur {
            Operateur::Plus => gauche + droite,
            Operateur::Moins => gauche - droite,
            Operateur::Fois => gauche * droite,
            Operateur::Divise => {
                if droite == 0.0 {
                    return self.erreur();
                }
                gauche / droite
            }
            Operateur::Puissance => gauche.powf(droite),
        };

        self.historique.push(format!(
            "{} {} {} = {}",
            format_nombre(gauche),
            op.operateur,
            format_nombre(droite),
            format_nombre(resultat)
        ));
        self.tampon = Tampon::depuis_nombre(resultat);
        self.etat = Etat::Repos;
        Reaction::AJOUT
    }

    /* ------------------------ Fonctions unaires ------------------------ */

    /// Applique une fonction au tampon. L’opération en attente n’est pas touchée :
    /// son opérande droite sera simplement le résultat de la fonction.
    pub fn fonction(&mut self, f: Fonction) -> Reaction {
        if self.en_erreur() {
            return Reaction::RIEN;
        }

        let x = self.tampon.valeur();
        let resultat = match f {
            Fonction::Racine => {
                if x < 0.0 {
                    return self.erreur();
                }
                x.sqrt()
            }
            // degrés
            Fonction::Sin => (x * PI / 180.0).sin(),
            Fonction::Cos => (x * PI / 180.0).cos(),
            Fonction::Tan => (x * PI / 180.0).tan(),
            Fonction::Exp => x.exp(),
        };

        self.historique
            .push(format!("{f}({}) = {}", format_nombre(x), format_nombre(resultat)));
        self.tampon = Tampon::depuis_nombre(resultat);
        Reaction::AJOUT
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire_action(&mut self, action: ActionMemoire) -> Reaction {
        match action {
            // ne lit pas le tampon : permis même en erreur
            ActionMemoire::Effacer => {
                self.memoire = 0.0;
                Reaction::RIEN
            }
            _ if self.en_erreur() => Reaction::RIEN,
            ActionMemoire::Rappeler => {
                self.tampon = Tampon::depuis_nombre(self.memoire);
                Reaction::ECRAN
            }
            ActionMemoire::Ajouter => {
                self.memoire += self.tampon.valeur();
                Reaction::RIEN
            }
            ActionMemoire::Soustraire => {
                self.memoire -= self.tampon.valeur();
                Reaction::RIEN
            }
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Recharge le tampon avec la valeur finale d’une ligne d’historique.
    pub fn reutiliser(&mut self, valeur: &str) -> Reaction {
        if self.en_erreur() {
            return Reaction::RIEN;
        }
        match Tampon::depuis_historique(valeur) {
            Some(t) => {
                self.tampon = t;
                Reaction::ECRAN
            }
            None => Reaction::RIEN,
        }
    }

    pub fn effacer_historique(&mut self) -> Reaction {
        self.historique.clear();
        Reaction {
            rafraichir: false,
            historique: Some(ChangementHistorique::Vidage),
        }
    }
}
