//! Noyau de la calculatrice accumulateur
//!
//! Organisation interne :
//! - commande.rs   : vocabulaire d’entrée (chiffres, opérateurs, fonctions, mémoire) + clavier
//! - format.rs     : affichage (séparateurs de milliers, sentinelle "Error")
//! - tampon.rs     : tampon de saisie (un seul point, plafond de frappe, lecture permissive)
//! - evaluateur.rs : machine à états (un opérateur en attente, commit gauche -> droite)
//! - historique.rs : magasins d’historique (mémoire / fichier JSON / localStorage)
//! - session.rs    : évaluateur + écran + magasin (write-through, journalisation)

pub mod commande;
pub mod evaluateur;
pub mod format;
pub mod historique;
pub mod session;
pub mod tampon;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use commande::{depuis_touche, ActionMemoire, Commande, Fonction, Operateur};
pub use historique::{valeur_finale, MagasinHistorique, CLE_HISTORIQUE};
pub use session::{EcranTexte, Session};
