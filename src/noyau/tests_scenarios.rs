//! Tests scénarios : séquences de touches complètes, comme au clavier.
//!
//! Chaque scénario est une chaîne de touches (même table que le clavier) :
//! - chiffres, `.`, `+ - * / ^`, `=`, `C`
//! - mots entre crochets pour le reste : `[sqrt]`, `[sin]`, `[mc]`, `[m+]`, `[mr]`, `[<]`
//!
//! Invariants vérifiés ici :
//! - C idempotent
//! - ÷0 / √(<0) => "Error", aucune ligne d’historique, opération en attente perdue
//! - évaluation séquentielle gauche -> droite (pas de précédence)
//! - mémoire indépendante de C

use super::commande::{depuis_touche, ActionMemoire, Commande, Fonction};
use super::evaluateur::{Etat, Evaluateur};
use super::format::format_nombre;
use super::tampon::LONGUEUR_MAX;

fn commande_mot(mot: &str) -> Commande {
    match mot {
        "sqrt" => Commande::Fonction(Fonction::Racine),
        "sin" => Commande::Fonction(Fonction::Sin),
        "cos" => Commande::Fonction(Fonction::Cos),
        "tan" => Commande::Fonction(Fonction::Tan),
        "exp" => Commande::Fonction(Fonction::Exp),
        "mc" => Commande::Memoire(ActionMemoire::Effacer),
        "mr" => Commande::Memoire(ActionMemoire::Rappeler),
        "m+" => Commande::Memoire(ActionMemoire::Ajouter),
        "m-" => Commande::Memoire(ActionMemoire::Soustraire),
        "<" => Commande::RetourArriere,
        _ => panic!("mot inconnu dans le scénario: {mot:?}"),
    }
}

fn jouer(ev: &mut Evaluateur, touches: &str) {
    let mut reste = touches;
    while let Some(c) = reste.chars().next() {
        if c == '[' {
            let fin = reste
                .find(']')
                .unwrap_or_else(|| panic!("crochet non fermé: {touches:?}"));
            ev.appliquer(commande_mot(&reste[1..fin]));
            reste = &reste[fin + 1..];
            continue;
        }
        if !c.is_whitespace() {
            let cmd = depuis_touche(&c.to_string())
                .unwrap_or_else(|| panic!("touche inconnue {c:?} dans {touches:?}"));
            ev.appliquer(cmd);
        }
        reste = &reste[c.len_utf8()..];
    }
}

fn scenario(touches: &str) -> Evaluateur {
    let mut ev = Evaluateur::new();
    jouer(&mut ev, touches);
    ev
}

/* ------------------------ Propriétés de base ------------------------ */

#[test]
fn scn_effacer_idempotent() {
    let mut a = scenario("12 + 3 [m+]");
    jouer(&mut a, "C");
    let mut b = a.clone();
    jouer(&mut b, "C");

    assert_eq!(a.tampon(), b.tampon());
    assert_eq!(a.etat(), b.etat());
    assert_eq!(a.memoire(), b.memoire());
    assert_eq!(a.historique(), b.historique());
    assert_eq!(b.tampon(), "0");
    assert_eq!(b.etat(), Etat::Repos);
}

#[test]
fn scn_format_entiers() {
    assert_eq!(format_nombre(1234567.0), "1,234,567");
    assert_eq!(format_nombre(0.0), "0");
}

#[test]
fn scn_division_par_zero() {
    let ev = scenario("5 / 0 =");
    assert_eq!(ev.tampon(), "Error");
    assert_eq!(ev.affichage(), "Error");
    assert!(ev.historique().is_empty());
    assert!(ev.operation_en_attente().is_none());
}

#[test]
fn scn_gauche_a_droite() {
    let ev = scenario("3 + 4 * 2 =");
    assert_eq!(ev.tampon(), "14");
    assert_eq!(ev.historique(), ["3 + 4 = 7", "7 * 2 = 14"]);
}

#[test]
fn scn_gauche_a_droite_sans_egal() {
    // l’opérateur suivant commit, "=" n’est pas obligatoire
    let ev = scenario("2 ^ 3 - 1 /");
    assert_eq!(ev.historique(), ["2 ^ 3 = 8", "8 - 1 = 7"]);
    assert_eq!(ev.tampon(), "7");
    assert!(ev.remplacement());
}

#[test]
fn scn_retour_arriere_sur_zero() {
    let ev = scenario("[<]");
    assert_eq!(ev.tampon(), "0");
    let ev = scenario("[<][<][<]");
    assert_eq!(ev.tampon(), "0");
}

#[test]
fn scn_memoire_survit_a_c() {
    let ev = scenario("[mc] 5 [m+] C [mr]");
    assert_eq!(ev.tampon(), "5");
    assert_eq!(ev.memoire(), 5.0);
}

#[test]
fn scn_plafond_seize_chiffres() {
    let mut ev = scenario("1234567890123456");
    assert_eq!(ev.tampon().len(), LONGUEUR_MAX);
    jouer(&mut ev, "7");
    assert_eq!(ev.tampon(), "1234567890123456");
    assert_eq!(ev.affichage(), "1,234,567,890,123,456");
}

#[test]
fn scn_racine_negative() {
    let mut ev = scenario("9 - 20 =");
    assert_eq!(ev.tampon(), "-11");
    assert_eq!(ev.historique(), ["9 - 20 = -11"]);

    jouer(&mut ev, "[sqrt]");
    assert_eq!(ev.tampon(), "Error");
    assert_eq!(ev.historique().len(), 1);
}

/* ------------------------ Scénarios étendus ------------------------ */

#[test]
fn scn_erreur_puis_c_repart_proprement() {
    let mut ev = scenario("8 / 0 = 4 + 1 =");
    assert_eq!(ev.tampon(), "Error");
    assert!(ev.historique().is_empty());

    jouer(&mut ev, "C 4 + 1 =");
    assert_eq!(ev.tampon(), "5");
    assert_eq!(ev.historique(), ["4 + 1 = 5"]);
}

#[test]
fn scn_memoire_accumule() {
    let ev = scenario("10 [m+] C 3 [m-] C 1 [m+] C [mr]");
    assert_eq!(ev.tampon(), "8");
}

#[test]
fn scn_resultat_decimal_et_separateurs() {
    let ev = scenario("1234 * 1000.5 =");
    assert_eq!(ev.historique(), ["1,234 * 1,000.5 = 1,234,617"]);
    assert_eq!(ev.affichage(), "1,234,617");
}

#[test]
fn scn_point_final_ignore_a_l_affichage() {
    let ev = scenario("12.");
    assert_eq!(ev.tampon(), "12.");
    assert_eq!(ev.affichage(), "12");

    let ev = scenario("12. + 3 =");
    assert_eq!(ev.historique(), ["12 + 3 = 15"]);
}

#[test]
fn scn_virgule_flottante_sans_arrondi() {
    let ev = scenario(".1 + .2 =");
    assert_eq!(ev.historique(), ["0.1 + 0.2 = 0.30000000000000004"]);
}

#[test]
fn scn_fonction_chainee() {
    let ev = scenario("256 [sqrt][sqrt][sqrt]");
    assert_eq!(ev.tampon(), "2");
    assert_eq!(
        ev.historique(),
        ["sqrt(256) = 16", "sqrt(16) = 4", "sqrt(4) = 2"]
    );
}

#[test]
fn scn_backspace_apres_resultat_negatif() {
    let ev = scenario("2 - 7 = [<]");
    assert_eq!(ev.tampon(), "0");
}

#[test]
fn scn_touches_alternatives() {
    let ev = scenario("6 x 7 =");
    assert_eq!(ev.tampon(), "42");
    let ev = scenario("84 ÷ 2 =");
    assert_eq!(ev.tampon(), "42");
}
